//! agent-frontmatter - Keep agent document headers in line with the policy table
//!
//! Usage:
//!   agent-frontmatter sync [--root DIR] [--dry-run]   - Rewrite every agent header
//!   agent-frontmatter classify <IDENTIFIER>           - Show the policy for one agent
//!   agent-frontmatter policy list [--class fixed]     - List policy entries
//!   agent-frontmatter policy stats                    - Policy table counts
//!   agent-frontmatter show <FILE> [--as IDENTIFIER]   - Preview one rewrite

use clap::{Parser, Subcommand};
use cli::commands::{ClassifyCommand, PolicyCommand, ShowCommand, SyncCommand};
use cli::Context;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agent-frontmatter")]
#[command(about = "Classify agent documents and rewrite their frontmatter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// YAML policy table replacing the built-in catalog
    #[arg(long, global = true)]
    policy_file: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite headers under the agents directory
    Sync(SyncCommand),
    /// Show the policy for one identifier
    Classify(ClassifyCommand),
    /// Inspect the policy table
    Policy(PolicyCommand),
    /// Preview the rewrite of one document
    Show(ShowCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for reports and previews
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let ctx = Context::load(cli.config.as_deref(), cli.policy_file)?;

    match cli.command {
        Commands::Sync(cmd) => cmd.run(ctx),
        Commands::Classify(cmd) => cmd.run(ctx),
        Commands::Policy(cmd) => cmd.run(ctx),
        Commands::Show(cmd) => cmd.run(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_flags() {
        let cli = Cli::try_parse_from([
            "agent-frontmatter",
            "sync",
            "--root",
            "agents",
            "--dry-run",
            "--strict",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Sync(cmd) => {
                assert_eq!(cmd.root, Some(PathBuf::from("agents")));
                assert!(cmd.dry_run);
                assert!(cmd.strict);
                assert!(cmd.json);
                assert!(!cmd.yes);
            }
            _ => panic!("expected sync"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "agent-frontmatter",
            "classify",
            "orchestration/task-loop.md",
            "--policy-file",
            "policy.yaml",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.policy_file, Some(PathBuf::from("policy.yaml")));
        match cli.command {
            Commands::Classify(cmd) => assert_eq!(cmd.identifier, "orchestration/task-loop.md"),
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_parse_show_as() {
        let cli = Cli::try_parse_from([
            "agent-frontmatter",
            "show",
            "draft.md",
            "--as",
            "backend/api-designer.md",
        ])
        .unwrap();
        match cli.command {
            Commands::Show(cmd) => {
                assert_eq!(cmd.file, PathBuf::from("draft.md"));
                assert_eq!(cmd.identifier.as_deref(), Some("backend/api-designer.md"));
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_parse_policy_list_class() {
        let cli =
            Cli::try_parse_from(["agent-frontmatter", "policy", "list", "--class", "dynamic"])
                .unwrap();
        assert!(matches!(cli.command, Commands::Policy(_)));

        let bad = Cli::try_parse_from(["agent-frontmatter", "policy", "list", "--class", "other"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["agent-frontmatter"]).is_err());
    }
}
