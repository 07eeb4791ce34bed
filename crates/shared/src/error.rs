//! Error types for frontmatter sync

use crate::policy::PolicyClass;
use thiserror::Error;

/// Error raised when a document opens a header block but never closes it
#[derive(Debug, Error)]
#[error(
    "Malformed header in '{identifier}': opening '---' has no closing marker \
     ({line_count} lines scanned)"
)]
pub struct MalformedHeaderError {
    pub identifier: String,
    pub line_count: usize,
}

/// Error raised when one identifier is assigned to both policy classes
#[derive(Debug, Error)]
#[error("Policy conflict: '{identifier}' is listed as both fixed and dynamic")]
pub struct PolicyConflictError {
    pub identifier: String,
}

/// General sync error type
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    MalformedHeader(#[from] MalformedHeaderError),

    #[error(transparent)]
    PolicyConflict(#[from] PolicyConflictError),

    #[error("Duplicate {class} policy entry for '{identifier}'")]
    DuplicateEntry {
        identifier: String,
        class: PolicyClass,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(String),
}

impl SyncError {
    /// Whether this error must abort the whole run rather than one document
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::PolicyConflict(_) | SyncError::DuplicateEntry { .. } | SyncError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
