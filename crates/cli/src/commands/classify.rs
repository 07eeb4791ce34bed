//! agent-frontmatter classify command

use crate::Context;
use clap::Args;
use policy::PolicyTable;
use shared::Classification;

#[derive(Debug, Args)]
pub struct ClassifyCommand {
    /// Relative document path, e.g. orchestration/task-loop.md
    pub identifier: String,
}

impl ClassifyCommand {
    pub fn run(&self, ctx: Context) -> anyhow::Result<()> {
        println!(
            "{}",
            describe(&ctx.table, &self.identifier, &ctx.config.default_model)
        );
        Ok(())
    }
}

/// Human-readable policy for one identifier
pub fn describe(table: &PolicyTable, identifier: &str, default_model: &str) -> String {
    match table.classify(identifier) {
        Classification::Fixed(policy) => {
            let mut out = format!(
                "{}: fixed\n  model: kept (default {})\n  tools: {}",
                identifier,
                default_model,
                policy.capabilities.render()
            );
            if let Some(scope) = policy.memory_scope {
                out.push_str(&format!("\n  memory: {}", scope));
            }
            out
        }
        Classification::Dynamic(policy) => format!(
            "{}: dynamic\n  model: removed (injected at run time)\n  tools: {}",
            identifier,
            policy.capabilities.render()
        ),
        Classification::Uncategorized => {
            format!("{}: uncategorized (document left unchanged)", identifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DynamicPolicy, FixedPolicy, MemoryScope};

    fn create_table() -> PolicyTable {
        PolicyTable::builder()
            .fixed(
                "orchestration/task-loop.md",
                FixedPolicy::new(["Read", "Task"]).with_memory(MemoryScope::Project),
            )
            .fixed("quality/reviewer.md", FixedPolicy::new(["Read"]))
            .dynamic("backend/api-designer.md", DynamicPolicy::new(["Read", "Write"]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_describe_fixed_with_memory() {
        let out = describe(&create_table(), "orchestration/task-loop.md", "sonnet");
        assert_eq!(
            out,
            "orchestration/task-loop.md: fixed\n  model: kept (default sonnet)\n  \
             tools: Read, Task\n  memory: project"
        );
    }

    #[test]
    fn test_describe_fixed_without_memory() {
        let out = describe(&create_table(), "quality/reviewer.md", "haiku");
        assert!(out.contains("default haiku"));
        assert!(!out.contains("memory"));
    }

    #[test]
    fn test_describe_dynamic() {
        let out = describe(&create_table(), "backend/api-designer.md", "sonnet");
        assert!(out.starts_with("backend/api-designer.md: dynamic"));
        assert!(out.ends_with("tools: Read, Write"));
    }

    #[test]
    fn test_describe_uncategorized() {
        let out = describe(&create_table(), "misc/scratch.md", "sonnet");
        assert_eq!(out, "misc/scratch.md: uncategorized (document left unchanged)");
    }
}
