//! # Agent Frontmatter Policy
//!
//! Maps agent document identifiers to their frontmatter policy.
//!
//! ## Components
//!
//! - `PolicyTable` - Immutable, disjoint fixed/dynamic lookup
//! - `catalog` - The built-in agent catalog

pub mod catalog;
pub mod policy_table;

pub use catalog::builtin;
pub use policy_table::{PolicyTable, PolicyTableBuilder};
