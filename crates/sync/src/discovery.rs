//! Discovery - Find candidate agent documents under a corpus root

use glob::{MatchOptions, Pattern};
use shared::{Result, SyncConfig, SyncError};
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// A document found under the corpus root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Slash-separated path relative to the root
    pub identifier: String,
    pub path: PathBuf,
    /// Exclude pattern that matched, if any
    pub excluded_by: Option<String>,
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Relative identifier of `path` under `root`, always `/`-separated
pub fn identifier_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Find documents under the configured root, sorted by identifier.
///
/// Files named in `ignore_files` are left out entirely; identifiers matching
/// an `exclude` pattern are returned with `excluded_by` set. Entries that
/// cannot be read while walking are logged and skipped.
pub fn discover(config: &SyncConfig) -> Result<Vec<Candidate>> {
    let root = &config.agents_dir;
    if !root.is_dir() {
        return Err(SyncError::Config(format!(
            "agents directory {:?} does not exist",
            root
        )));
    }

    let excludes = config
        .exclude
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map(|compiled| (p.clone(), compiled))
                .map_err(|e| SyncError::Config(format!("invalid exclude pattern '{}': {}", p, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    let root_str = root
        .to_str()
        .ok_or_else(|| SyncError::Config(format!("agents directory {:?} is not UTF-8", root)))?;
    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(root_str.trim_end_matches('/')),
        config.extension
    );

    let entries = glob::glob_with(&pattern, MATCH_OPTIONS)
        .map_err(|e| SyncError::Config(format!("invalid search pattern '{}': {}", pattern, e)))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(path = %e.path().display(), error = %e.error(), "skipping unreadable entry");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if config.is_ignored_file(file_name) {
            continue;
        }

        let Some(identifier) = identifier_for(root, &path) else {
            continue;
        };

        let excluded_by = excludes
            .iter()
            .find(|(_, compiled)| compiled.matches_with(&identifier, MATCH_OPTIONS))
            .map(|(raw, _)| raw.clone());

        candidates.push(Candidate {
            identifier,
            path,
            excluded_by,
        });
    }

    candidates.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(candidates)
}
