//! agent-frontmatter sync command

use crate::Context;
use ::sync::{ProgressSink, SyncDriver};
use audit::{RunEntry, RunEventType, RunReport};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Agents directory (overrides the config file)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Fail when any document is uncategorized
    #[arg(long)]
    pub strict: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl SyncCommand {
    pub fn run(&self, ctx: Context) -> anyhow::Result<()> {
        let mut config = ctx.config;
        if let Some(root) = &self.root {
            config.agents_dir = root.clone();
        }
        config.strict |= self.strict;

        if !self.confirm(&config.agents_dir)? {
            println!("Aborted; no files changed");
            return Ok(());
        }

        let driver = SyncDriver::new(config, ctx.table).dry_run(self.dry_run);
        let progress = BarProgress::new(self.json);
        let report = driver.run(&progress)?;

        if self.json {
            let json = report.export_json()?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else {
            print_report(&report);
        }

        if driver.violates_strict(&report) {
            anyhow::bail!(
                "{} uncategorized document(s) found in strict mode",
                report.stats().uncategorized
            );
        }
        Ok(())
    }

    /// Whether to ask before writing. The prompt goes to stderr, so `--json`
    /// output on stdout is unaffected.
    fn needs_confirmation(&self, interactive: bool) -> bool {
        interactive && !self.yes && !self.dry_run
    }

    fn confirm(&self, root: &std::path::Path) -> anyhow::Result<bool> {
        if !self.needs_confirmation(console::Term::stderr().is_term()) {
            return Ok(true);
        }

        let answer = dialoguer::Confirm::new()
            .with_prompt(format!("Rewrite agent frontmatter under {}?", root.display()))
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Progress bar over documents, hidden for JSON output
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(template) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
            bar.set_style(template);
        }
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn document_done(&self, entry: &RunEntry) {
        self.bar.set_message(entry.identifier.clone());
        self.bar.inc(1);
    }

    fn finished(&self) {
        self.bar.finish_and_clear();
    }
}

/// One report line per document
pub fn format_entry(entry: &RunEntry) -> String {
    match entry.event_type {
        RunEventType::Updated => {
            let class = entry.class.map(|c| c.as_str()).unwrap_or("-");
            let model = format!("model={}", entry.model.as_deref().unwrap_or("DYNAMIC"));
            let memory = entry
                .memory
                .as_deref()
                .map(|m| format!(" memory={}", m))
                .unwrap_or_default();
            let marker = if entry.changed { "OK" } else { "==" };
            format!(
                "  {} [{:7}] {:55} {:15} tools={}{}",
                marker,
                class,
                entry.identifier,
                model,
                entry.tools.as_deref().unwrap_or(""),
                memory
            )
        }
        RunEventType::NoHeader => format!("  SKIP (no frontmatter): {}", entry.identifier),
        RunEventType::Excluded => format!("  SKIP (excluded): {}", entry.identifier),
        RunEventType::Uncategorized => {
            format!("  WARN (uncategorized): {} - keeping original", entry.identifier)
        }
        RunEventType::Failed => format!(
            "  FAIL {}: {}",
            entry.identifier,
            entry.reason.as_deref().unwrap_or("unknown error")
        ),
    }
}

fn print_report(report: &RunReport) {
    let rule = "=".repeat(80);
    println!("{}", rule);
    if report.dry_run {
        println!("Agent frontmatter sync {}", style("(dry run)").yellow());
    } else {
        println!("Agent frontmatter sync");
    }
    println!("{}", rule);
    println!();

    for entry in report.entries() {
        let line = format_entry(entry);
        match entry.event_type {
            RunEventType::Updated => println!("{}", style(line).green()),
            RunEventType::Uncategorized => println!("{}", style(line).yellow()),
            RunEventType::Failed => println!("{}", style(line).red()),
            RunEventType::NoHeader | RunEventType::Excluded => println!("{}", style(line).dim()),
        }
    }

    let stats = report.stats();
    println!();
    println!("{}", rule);
    println!(
        "SUMMARY: {} updated ({} changed), {} skipped, {} failed",
        stats.updated,
        stats.changed,
        stats.skipped(),
        stats.failed
    );
    println!(
        "  no frontmatter: {}  uncategorized: {}  excluded: {}",
        stats.no_header, stats.uncategorized, stats.excluded
    );
    println!("Fixed-model agents: {}", stats.fixed_policies);
    println!("Dynamic-model agents: {}", stats.dynamic_policies);
    println!("Total categorized: {}", stats.total_categorized());
    if !report.missing().is_empty() {
        println!(
            "{}",
            style(format!(
                "Policy entries with no document: {}",
                report.missing().len()
            ))
            .yellow()
        );
        for identifier in report.missing() {
            println!("  - {}", identifier);
        }
    }
    println!("{}", rule);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{HeaderFields, PolicyClass};

    fn updated_entry(changed: bool, memory: bool) -> RunEntry {
        let mut fields: HeaderFields = [("model", "opus"), ("tools", "Read, Task")]
            .into_iter()
            .collect();
        if memory {
            fields.insert("memory", "project");
        }
        let mut report = RunReport::new(1, 0, false);
        report.log_updated("orchestration/task-loop.md", PolicyClass::Fixed, &fields, changed);
        report.entries()[0].clone()
    }

    fn command(yes: bool, dry_run: bool, json: bool) -> SyncCommand {
        SyncCommand {
            root: None,
            dry_run,
            strict: false,
            yes,
            json,
        }
    }

    // ============== Confirmation Tests ==============

    #[test]
    fn test_confirmation_required_on_terminal() {
        assert!(command(false, false, false).needs_confirmation(true));
        assert!(!command(false, false, false).needs_confirmation(false));
    }

    #[test]
    fn test_json_still_confirms() {
        assert!(command(false, false, true).needs_confirmation(true));
    }

    #[test]
    fn test_yes_and_dry_run_skip_confirmation() {
        assert!(!command(true, false, false).needs_confirmation(true));
        assert!(!command(false, true, true).needs_confirmation(true));
    }

    // ============== Report Line Tests ==============

    #[test]
    fn test_format_updated() {
        let line = format_entry(&updated_entry(true, true));
        assert!(line.starts_with("  OK [fixed  ] orchestration/task-loop.md"));
        assert!(line.contains("model=opus"));
        assert!(line.ends_with("tools=Read, Task memory=project"));
    }

    #[test]
    fn test_format_unchanged_marker() {
        let line = format_entry(&updated_entry(false, false));
        assert!(line.starts_with("  == "));
        assert!(!line.contains("memory="));
    }

    #[test]
    fn test_format_dynamic_model() {
        let mut report = RunReport::new(0, 1, false);
        let fields: HeaderFields = [("tools", "Read")].into_iter().collect();
        report.log_updated("backend/api-designer.md", PolicyClass::Dynamic, &fields, true);

        let line = format_entry(&report.entries()[0]);
        assert!(line.contains("[dynamic]"));
        assert!(line.contains("model=DYNAMIC"));
    }

    #[test]
    fn test_format_skips_and_failures() {
        let mut report = RunReport::new(0, 0, false);
        report.log_no_header("a.md");
        report.log_uncategorized("b.md");
        report.log_failed("c.md", "boom");

        let lines: Vec<String> = report.entries().iter().map(format_entry).collect();
        assert_eq!(lines[0], "  SKIP (no frontmatter): a.md");
        assert_eq!(lines[1], "  WARN (uncategorized): b.md - keeping original");
        assert_eq!(lines[2], "  FAIL c.md: boom");
    }
}
