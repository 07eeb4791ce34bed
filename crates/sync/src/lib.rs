//! # Agent Frontmatter Sync
//!
//! Batch driver: discovers agent documents under a corpus root, rewrites their
//! headers through [`frontmatter::Processor`] and records every outcome in an
//! [`audit::RunReport`].

pub mod discovery;
pub mod driver;

pub use discovery::{discover, identifier_for, Candidate};
pub use driver::{load_policy_table, NullProgress, ProgressSink, SyncDriver};
