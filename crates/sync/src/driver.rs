//! SyncDriver - Run the header rewrite over a whole corpus

use crate::discovery::{discover, Candidate};
use audit::{RunEntry, RunReport};
use frontmatter::{HeaderMerger, Outcome, Processor};
use policy::PolicyTable;
use shared::{Result, SyncConfig};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tracing::{error, info, warn};

/// Receives progress while a run is in flight
pub trait ProgressSink {
    fn started(&self, total: usize);
    fn document_done(&self, entry: &RunEntry);
    fn finished(&self) {}
}

/// No-op progress sink
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn started(&self, _total: usize) {}
    fn document_done(&self, _entry: &RunEntry) {}
}

/// Load the configured policy table, or the built-in catalog
pub fn load_policy_table(config: &SyncConfig) -> Result<PolicyTable> {
    match &config.policy_file {
        Some(path) => {
            info!(path = %path.display(), "loading policy table");
            PolicyTable::from_file(path)
        }
        None => policy::builtin(),
    }
}

/// Batch driver over one agents directory
#[derive(Debug)]
pub struct SyncDriver {
    config: SyncConfig,
    table: PolicyTable,
    dry_run: bool,
}

impl SyncDriver {
    /// Create a driver. The table is validated before it gets here.
    pub fn new(config: SyncConfig, table: PolicyTable) -> Self {
        Self {
            config,
            table,
            dry_run: false,
        }
    }

    /// Compute outcomes without writing any file
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    fn processor(&self) -> Processor<'_> {
        Processor::new(&self.table)
            .with_merger(HeaderMerger::with_default_model(&self.config.default_model))
    }

    /// Run over every discovered document.
    ///
    /// Per-document failures are recorded and the run continues; only a
    /// missing root or an invalid pattern aborts.
    pub fn run(&self, progress: &dyn ProgressSink) -> Result<RunReport> {
        let candidates = discover(&self.config)?;
        let processor = self.processor();
        let mut report = RunReport::new(
            self.table.fixed_len(),
            self.table.dynamic_len(),
            self.dry_run,
        );

        info!(
            root = %self.config.agents_dir.display(),
            documents = candidates.len(),
            dry_run = self.dry_run,
            "starting frontmatter sync"
        );
        progress.started(candidates.len());

        let mut seen = HashSet::new();
        for candidate in &candidates {
            seen.insert(candidate.identifier.as_str());
            self.sync_document(&processor, candidate, &mut report);
            if let Some(entry) = report.entries().last() {
                progress.document_done(entry);
            }
        }

        let missing: Vec<String> = self
            .table
            .identifiers()
            .into_iter()
            .filter(|id| !seen.contains(id))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            warn!(count = missing.len(), "policy entries without a document");
        }

        report.finish(missing);
        progress.finished();
        Ok(report)
    }

    fn sync_document(
        &self,
        processor: &Processor<'_>,
        candidate: &Candidate,
        report: &mut RunReport,
    ) {
        let identifier = candidate.identifier.as_str();

        if let Some(pattern) = &candidate.excluded_by {
            info!(identifier, pattern = pattern.as_str(), "skipping excluded document");
            report.log_excluded(identifier, pattern);
            return;
        }

        let raw = match std::fs::read_to_string(&candidate.path) {
            Ok(raw) => raw,
            Err(e) => {
                error!(identifier, error = %e, "failed to read document");
                report.log_failed(identifier, format!("read failed: {}", e));
                return;
            }
        };

        let outcome = match processor.process(identifier, &raw) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(identifier, error = %e, "failed to process document");
                report.log_failed(identifier, e.to_string());
                return;
            }
        };

        match outcome {
            Outcome::Updated(rewrite) => {
                if rewrite.changed && !self.dry_run {
                    if let Err(e) = write_atomic(&candidate.path, &rewrite.text) {
                        error!(identifier, error = %e, "failed to write document");
                        report.log_failed(identifier, format!("write failed: {}", e));
                        return;
                    }
                    info!(identifier, class = %rewrite.class, "header rewritten");
                }
                report.log_updated(identifier, rewrite.class, &rewrite.fields, rewrite.changed);
            }
            Outcome::NoHeader => {
                warn!(identifier, "no frontmatter; skipped");
                report.log_no_header(identifier);
            }
            Outcome::Uncategorized => {
                warn!(identifier, "uncategorized; kept original");
                report.log_uncategorized(identifier);
            }
        }
    }

    /// Whether a finished run breaks the strictness setting
    pub fn violates_strict(&self, report: &RunReport) -> bool {
        self.config.strict && report.stats().uncategorized > 0
    }
}

/// Replace the file behind `path` with `contents` in one rename so a reader
/// never sees a half-written header. Symlinks are resolved first; the link
/// stays and its target is rewritten.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let target = std::fs::canonicalize(path)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let permissions = std::fs::metadata(&target)?.permissions();

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    std::fs::set_permissions(tmp.path(), permissions)?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
