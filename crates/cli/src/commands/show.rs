//! agent-frontmatter show command

use crate::Context;
use anyhow::Context as _;
use clap::Args;
use frontmatter::{HeaderMerger, Outcome, Processor};
use policy::PolicyTable;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Document to preview
    pub file: PathBuf,

    /// Identifier to classify under (defaults to the path relative to the agents directory)
    #[arg(long = "as", value_name = "IDENTIFIER")]
    pub identifier: Option<String>,
}

impl ShowCommand {
    pub fn run(&self, ctx: Context) -> anyhow::Result<()> {
        let identifier = match &self.identifier {
            Some(id) => id.clone(),
            None => ::sync::identifier_for(&ctx.config.agents_dir, &self.file).with_context(|| {
                format!(
                    "{:?} is not under {:?}; pass --as <IDENTIFIER>",
                    self.file, ctx.config.agents_dir
                )
            })?,
        };

        let raw = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {:?}", self.file))?;

        let (text, outcome) = preview(&ctx.table, &ctx.config.default_model, &identifier, &raw)?;
        eprintln!("{}: {}", identifier, outcome.code());
        print!("{}", text);
        Ok(())
    }
}

/// Document text after processing, without touching the file
pub fn preview(
    table: &PolicyTable,
    default_model: &str,
    identifier: &str,
    raw: &str,
) -> anyhow::Result<(String, Outcome)> {
    let processor =
        Processor::new(table).with_merger(HeaderMerger::with_default_model(default_model));
    let outcome = processor.process(identifier, raw)?;
    Ok((outcome.text(raw).to_string(), outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DynamicPolicy, FixedPolicy};

    fn create_table() -> PolicyTable {
        PolicyTable::builder()
            .fixed("quality/reviewer.md", FixedPolicy::new(["Read"]))
            .dynamic("backend/api-designer.md", DynamicPolicy::new(["Read", "Write"]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_preview_fixed_uses_default_model() {
        let (text, outcome) = preview(
            &create_table(),
            "haiku",
            "quality/reviewer.md",
            "---\nname: reviewer\n---\nbody\n",
        )
        .unwrap();
        assert!(outcome.is_updated());
        assert_eq!(
            text,
            "---\nname: reviewer\ndescription: \"\"\nmodel: haiku\ntools: Read\n---\nbody\n"
        );
    }

    #[test]
    fn test_preview_dynamic() {
        let (text, _) = preview(
            &create_table(),
            "sonnet",
            "backend/api-designer.md",
            "---\nname: api\nmodel: opus\n---\n",
        )
        .unwrap();
        assert_eq!(text, "---\nname: api\ndescription: \"\"\ntools: Read, Write\n---\n");
    }

    #[test]
    fn test_preview_uncategorized_unchanged() {
        let raw = "---\nname: x\n---\n";
        let (text, outcome) = preview(&create_table(), "sonnet", "misc/x.md", raw).unwrap();
        assert_eq!(outcome, Outcome::Uncategorized);
        assert_eq!(text, raw);
    }

    #[test]
    fn test_preview_malformed_fails() {
        let result = preview(&create_table(), "sonnet", "quality/reviewer.md", "---\nname: x\n");
        assert!(result.is_err());
    }
}
