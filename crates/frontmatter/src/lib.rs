//! # Agent Frontmatter
//!
//! Parse, merge and re-render the `---` delimited header block of an agent
//! document.
//!
//! ## Components
//!
//! - `parser` - Flat `key: value` header extraction
//! - `merger` - Policy-driven field rules
//! - `serializer` - Deterministic header rendering
//! - `processor` - Single-document entry point

pub mod merger;
pub mod parser;
pub mod processor;
pub mod serializer;

pub use merger::{FieldRule, HeaderMerger};
pub use parser::{parse, ParsedHeader, UnclosedHeader, MARKER};
pub use processor::{Outcome, Processor, Rewrite};
pub use serializer::{render_document, render_header};
