//! Configuration types for a sync run

use crate::policy::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one batch run over an agents directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// Corpus root; identifiers are relative to it
    pub agents_dir: PathBuf,

    /// Tier written for fixed agents that have no `model` yet
    pub default_model: String,

    /// Glob patterns (against identifiers) reported as skipped without reading
    pub exclude: Vec<String>,

    /// File names ignored entirely
    pub ignore_files: Vec<String>,

    /// Document file extension, without the dot
    pub extension: String,

    /// Fail the run when any document is uncategorized
    pub strict: bool,

    /// YAML policy table replacing the built-in one
    pub policy_file: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            agents_dir: PathBuf::from("agents"),
            default_model: DEFAULT_MODEL.to_string(),
            exclude: vec!["templates/**".to_string()],
            ignore_files: vec!["README.md".to_string()],
            extension: "md".to_string(),
            strict: false,
            policy_file: None,
        }
    }
}

impl SyncConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a sensible run
    pub fn validate(&self) -> crate::Result<()> {
        if self.default_model.trim().is_empty() {
            return Err(crate::SyncError::Config(
                "defaultModel must not be empty".to_string(),
            ));
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(crate::SyncError::Config(format!(
                "extension must be a bare suffix like 'md', got '{}'",
                self.extension
            )));
        }
        Ok(())
    }

    /// Whether a file name is ignored entirely
    pub fn is_ignored_file(&self, file_name: &str) -> bool {
        self.ignore_files.iter().any(|f| f == file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.agents_dir, PathBuf::from("agents"));
        assert_eq!(config.default_model, "sonnet");
        assert_eq!(config.exclude, vec!["templates/**"]);
        assert!(config.is_ignored_file("README.md"));
        assert!(!config.strict);
    }

    #[test]
    fn test_config_parse_partial() {
        let json = r#"{
            "agentsDir": "plugins/agents",
            "strict": true
        }"#;

        let config: SyncConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.agents_dir, PathBuf::from("plugins/agents"));
        assert!(config.strict);
        assert_eq!(config.extension, "md");
        assert!(config.policy_file.is_none());
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let config = SyncConfig {
            extension: ".md".to_string(),
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let config = SyncConfig {
            default_model: " ".to_string(),
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.json");
        std::fs::write(&path, r#"{ "defaultModel": "opus", "exclude": [] }"#).unwrap();

        let config = SyncConfig::from_file(&path).unwrap();
        assert_eq!(config.default_model, "opus");
        assert!(config.exclude.is_empty());
    }
}
