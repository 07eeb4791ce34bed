//! Run context - configuration and policy table loaded once per invocation

use anyhow::Context as _;
use policy::PolicyTable;
use shared::SyncConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration plus the validated policy table
#[derive(Debug)]
pub struct Context {
    pub config: SyncConfig,
    pub table: PolicyTable,
}

impl Context {
    /// Load the config file (if any), apply the policy file override, then
    /// build the policy table. A policy conflict fails here, before any
    /// document is touched.
    pub fn load(config_path: Option<&Path>, policy_file: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut config = match config_path {
            Some(path) => SyncConfig::from_file(path)
                .with_context(|| format!("failed to load config {:?}", path))?,
            None => SyncConfig::default(),
        };

        if policy_file.is_some() {
            config.policy_file = policy_file;
        }

        let table = sync::load_policy_table(&config).context("failed to load policy table")?;
        debug!(
            fixed = table.fixed_len(),
            dynamic = table.dynamic_len(),
            "policy table loaded"
        );

        Ok(Self { config, table })
    }
}
