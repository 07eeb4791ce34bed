//! # Agent Frontmatter Shared
//!
//! Common types used across the frontmatter sync crates: header field sets,
//! policy entries, run configuration and error types.

pub mod config;
pub mod error;
pub mod header;
pub mod policy;

// Re-exports
pub use config::*;
pub use error::*;
pub use header::*;
pub use policy::*;
