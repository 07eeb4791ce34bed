//! agent-frontmatter policy command

use crate::Context;
use clap::{Args, Subcommand, ValueEnum};
use ::policy::PolicyTable;
use shared::PolicyClass;

#[derive(Debug, Args)]
pub struct PolicyCommand {
    #[command(subcommand)]
    pub command: PolicySubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PolicySubcommand {
    /// List policy entries
    List {
        /// Only show one class
        #[arg(long, value_enum)]
        class: Option<ClassArg>,
    },
    /// Show policy table statistics
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassArg {
    Fixed,
    Dynamic,
}

impl From<ClassArg> for PolicyClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Fixed => PolicyClass::Fixed,
            ClassArg::Dynamic => PolicyClass::Dynamic,
        }
    }
}

impl PolicyCommand {
    pub fn run(&self, ctx: Context) -> anyhow::Result<()> {
        let lines = match &self.command {
            PolicySubcommand::List { class } => list_lines(&ctx.table, class.map(Into::into)),
            PolicySubcommand::Stats => stats_lines(&ctx.table),
        };
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }
}

/// One line per entry, fixed entries first, each set sorted by identifier
pub fn list_lines(table: &PolicyTable, class: Option<PolicyClass>) -> Vec<String> {
    let mut lines = Vec::new();

    if class != Some(PolicyClass::Dynamic) {
        for (identifier, policy) in table.fixed_entries() {
            let memory = policy
                .memory_scope
                .map(|m| format!(" memory={}", m))
                .unwrap_or_default();
            lines.push(format!(
                "[fixed  ] {} tools={}{}",
                identifier,
                policy.capabilities.render(),
                memory
            ));
        }
    }

    if class != Some(PolicyClass::Fixed) {
        for (identifier, policy) in table.dynamic_entries() {
            lines.push(format!(
                "[dynamic] {} tools={}",
                identifier,
                policy.capabilities.render()
            ));
        }
    }

    lines
}

pub fn stats_lines(table: &PolicyTable) -> Vec<String> {
    let with_memory = table
        .fixed_entries()
        .filter(|(_, p)| p.memory_scope.is_some())
        .count();

    vec![
        format!("Fixed-model agents: {}", table.fixed_len()),
        format!("  with memory scope: {}", with_memory),
        format!("Dynamic-model agents: {}", table.dynamic_len()),
        format!("Total categorized: {}", table.len()),
    ]
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
    fn test_list_all() {
        let lines = list_lines(&create_table(), None);
        assert_eq!(
            lines,
            vec![
                "[fixed  ] orchestration/task-loop.md tools=Read, Task memory=project",
                "[fixed  ] quality/reviewer.md tools=Read",
                "[dynamic] backend/api-designer.md tools=Read, Write",
            ]
        );
    }

    #[test]
    fn test_list_filtered() {
        let table = create_table();
        assert_eq!(list_lines(&table, Some(PolicyClass::Fixed)).len(), 2);
        assert_eq!(list_lines(&table, Some(PolicyClass::Dynamic)).len(), 1);
    }

    #[test]
    fn test_stats() {
        let lines = stats_lines(&create_table());
        assert_eq!(lines[0], "Fixed-model agents: 2");
        assert_eq!(lines[1], "  with memory scope: 1");
        assert_eq!(lines[2], "Dynamic-model agents: 1");
        assert_eq!(lines[3], "Total categorized: 3");
    }

    #[test]
    fn test_builtin_stats() {
        let lines = stats_lines(&::policy::builtin().unwrap());
        assert_eq!(lines[0], "Fixed-model agents: 61");
        assert_eq!(lines[3], "Total categorized: 127");
    }
}
