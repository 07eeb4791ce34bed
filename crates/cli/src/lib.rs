//! Agent frontmatter CLI - commands and shared run context

pub mod commands;
pub mod context;

pub use context::Context;
