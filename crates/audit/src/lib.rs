//! # Agent Frontmatter Audit
//!
//! Per-document outcome records and aggregate tallies for a sync run.

mod run_report;

pub use run_report::{RunEntry, RunEventType, RunReport, RunStats};
