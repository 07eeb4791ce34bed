//! RunReport - Outcome record for one sync run

use serde::{Deserialize, Serialize};
use shared::{keys, HeaderFields, PolicyClass};

/// Outcome record for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunEntry {
    pub timestamp: String,
    pub identifier: String,
    pub event_type: RunEventType,
    pub class: Option<PolicyClass>,
    /// File content differs from what was on disk
    pub changed: bool,
    pub model: Option<String>,
    pub tools: Option<String>,
    pub memory: Option<String>,
    pub reason: Option<String>,
}

impl RunEntry {
    fn new(identifier: &str, event_type: RunEventType) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            identifier: identifier.to_string(),
            event_type,
            class: None,
            changed: false,
            model: None,
            tools: None,
            memory: None,
            reason: None,
        }
    }
}

/// Types of per-document outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEventType {
    Updated,
    NoHeader,
    Uncategorized,
    Excluded,
    Failed,
}

/// Report for one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub started_at: String,
    pub finished_at: Option<String>,
    pub dry_run: bool,
    pub fixed_policies: usize,
    pub dynamic_policies: usize,
    entries: Vec<RunEntry>,
    /// Policy identifiers with no matching document on disk
    missing: Vec<String>,
}

impl RunReport {
    /// Start a report for a table with the given set sizes
    pub fn new(fixed_policies: usize, dynamic_policies: usize, dry_run: bool) -> Self {
        Self {
            started_at: chrono::Utc::now().to_rfc3339(),
            finished_at: None,
            dry_run,
            fixed_policies,
            dynamic_policies,
            entries: Vec::new(),
            missing: Vec::new(),
        }
    }

    /// Record an entry
    pub fn log(&mut self, entry: RunEntry) {
        self.entries.push(entry);
    }

    /// Record a header rewrite
    pub fn log_updated(
        &mut self,
        identifier: &str,
        class: PolicyClass,
        fields: &HeaderFields,
        changed: bool,
    ) {
        let mut entry = RunEntry::new(identifier, RunEventType::Updated);
        entry.class = Some(class);
        entry.changed = changed;
        entry.model = fields.get(keys::MODEL).map(str::to_string);
        entry.tools = fields.get(keys::TOOLS).map(str::to_string);
        entry.memory = fields.get(keys::MEMORY).map(str::to_string);
        self.log(entry);
    }

    /// Record a document without a header block
    pub fn log_no_header(&mut self, identifier: &str) {
        self.log(RunEntry::new(identifier, RunEventType::NoHeader));
    }

    /// Record a document missing from the policy table
    pub fn log_uncategorized(&mut self, identifier: &str) {
        let mut entry = RunEntry::new(identifier, RunEventType::Uncategorized);
        entry.reason = Some("not in policy table; kept original".to_string());
        self.log(entry);
    }

    /// Record a document skipped by an exclude pattern
    pub fn log_excluded(&mut self, identifier: &str, pattern: &str) {
        let mut entry = RunEntry::new(identifier, RunEventType::Excluded);
        entry.reason = Some(format!("matches exclude pattern '{}'", pattern));
        self.log(entry);
    }

    /// Record a document that could not be processed
    pub fn log_failed(&mut self, identifier: &str, reason: impl Into<String>) {
        let mut entry = RunEntry::new(identifier, RunEventType::Failed);
        entry.reason = Some(reason.into());
        self.log(entry);
    }

    /// Close the report, recording policy entries never seen on disk
    pub fn finish(&mut self, missing: Vec<String>) {
        self.missing = missing;
        self.finished_at = Some(chrono::Utc::now().to_rfc3339());
    }

    /// All entries in processing order
    pub fn entries(&self) -> &[RunEntry] {
        &self.entries
    }

    /// Entries of one type
    pub fn entries_of(&self, event_type: RunEventType) -> Vec<&RunEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Get statistics
    pub fn stats(&self) -> RunStats {
        let count = |t: RunEventType| self.entries.iter().filter(|e| e.event_type == t).count();

        RunStats {
            updated: count(RunEventType::Updated),
            changed: self.entries.iter().filter(|e| e.changed).count(),
            no_header: count(RunEventType::NoHeader),
            uncategorized: count(RunEventType::Uncategorized),
            excluded: count(RunEventType::Excluded),
            failed: count(RunEventType::Failed),
            fixed_policies: self.fixed_policies,
            dynamic_policies: self.dynamic_policies,
        }
    }

    /// Export as JSON, with the aggregate counts under `stats`
    pub fn export_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        let stats = serde_json::to_value(self.stats())?;
        if let Some(map) = value.as_object_mut() {
            map.insert("stats".to_string(), stats);
        }
        Ok(value)
    }
}

/// Aggregate counts for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub updated: usize,
    pub changed: usize,
    pub no_header: usize,
    pub uncategorized: usize,
    pub excluded: usize,
    pub failed: usize,
    pub fixed_policies: usize,
    pub dynamic_policies: usize,
}

impl RunStats {
    /// Documents left untouched for an expected reason
    pub fn skipped(&self) -> usize {
        self.no_header + self.uncategorized + self.excluded
    }

    pub fn total_categorized(&self) -> usize {
        self.fixed_policies + self.dynamic_policies
    }
}
