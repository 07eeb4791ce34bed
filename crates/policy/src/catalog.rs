//! Built-in agent catalog
//!
//! Fixed agents sit outside the task-loop escalation chain and always run at
//! their own tier: orchestrators, diagnosis, reviewers, security auditors,
//! research, planning and coordinators. Dynamic agents are the implementers
//! the task loop escalates between, so their tier is chosen by the caller.

use crate::PolicyTable;
use shared::{DynamicPolicy, FixedPolicy, MemoryScope, Result};

const READ_ONLY: &[&str] = &["Read", "Glob", "Grep"];
const ANALYSIS: &[&str] = &["Read", "Glob", "Grep", "Bash"];
const COORDINATOR: &[&str] = &["Read", "Glob", "Grep", "Bash", "Task"];
const RESEARCH: &[&str] = &["Read", "Glob", "Grep", "Bash", "WebSearch", "WebFetch"];
const PLANNER: &[&str] = &["Read", "Glob", "Grep", "Bash", "Write"];
const IMPLEMENTER: &[&str] = &["Read", "Edit", "Write", "Glob", "Grep", "Bash"];
const IMPLEMENTER_COORDINATOR: &[&str] = &["Read", "Edit", "Write", "Glob", "Grep", "Bash", "Task"];

const PROJECT: Option<MemoryScope> = Some(MemoryScope::Project);

#[rustfmt::skip]
const FIXED_AGENTS: &[(&str, &[&str], Option<MemoryScope>)] = &[
    ("orchestration/autonomous-controller.md",            COORDINATOR, PROJECT),
    ("orchestration/bug-council-orchestrator.md",         COORDINATOR, PROJECT),
    ("orchestration/code-review-coordinator.md",          COORDINATOR, None),
    ("orchestration/quality-gate-enforcer.md",            ANALYSIS, PROJECT),
    ("orchestration/requirements-validator.md",           ANALYSIS, None),
    ("orchestration/scope-validator.md",                  ANALYSIS, None),
    ("orchestration/sprint-loop.md",                      COORDINATOR, None),
    ("orchestration/sprint-orchestrator.md",              COORDINATOR, PROJECT),
    ("orchestration/task-loop.md",                        COORDINATOR, PROJECT),
    ("orchestration/track-merger.md",                     COORDINATOR, None),
    ("orchestration/workflow-compliance.md",              ANALYSIS, None),

    ("diagnosis/adversarial-tester.md",                   ANALYSIS, None),
    ("diagnosis/code-archaeologist.md",                   ANALYSIS, None),
    ("diagnosis/pattern-matcher.md",                      ANALYSIS, None),
    ("diagnosis/root-cause-analyst.md",                   ANALYSIS, None),
    ("diagnosis/systems-thinker.md",                      ANALYSIS, None),

    ("backend/api-design-reviewer.md",                    READ_ONLY, None),
    ("backend/backend-code-reviewer-csharp.md",           READ_ONLY, None),
    ("backend/backend-code-reviewer-go.md",               READ_ONLY, None),
    ("backend/backend-code-reviewer-java.md",             READ_ONLY, None),
    ("backend/backend-code-reviewer-php.md",              READ_ONLY, None),
    ("backend/backend-code-reviewer-python.md",           READ_ONLY, None),
    ("backend/backend-code-reviewer-ruby.md",             READ_ONLY, None),
    ("backend/backend-code-reviewer-typescript.md",       READ_ONLY, None),

    ("frontend/frontend-code-reviewer.md",                READ_ONLY, None),

    ("mobile/android-code-reviewer.md",                   READ_ONLY, None),
    ("mobile/ios-code-reviewer.md",                       READ_ONLY, None),

    ("database/sql-code-reviewer.md",                     READ_ONLY, None),
    ("database/nosql-code-reviewer.md",                   READ_ONLY, None),

    ("security/compliance-engineer.md",                   ANALYSIS, None),
    ("security/mobile-security-auditor.md",               ANALYSIS, None),
    ("security/penetration-tester.md",                    ANALYSIS, None),
    ("security/security-auditor-csharp.md",               ANALYSIS, None),
    ("security/security-auditor-go.md",                   ANALYSIS, None),
    ("security/security-auditor-java.md",                 ANALYSIS, None),
    ("security/security-auditor-php.md",                  ANALYSIS, None),
    ("security/security-auditor-python.md",               ANALYSIS, None),
    ("security/security-auditor-ruby.md",                 ANALYSIS, None),
    ("security/security-auditor-typescript.md",           ANALYSIS, None),

    ("research/research-agent.md",                        RESEARCH, PROJECT),

    ("planning/prd-generator.md",                         PLANNER, None),
    ("planning/sprint-planner.md",                        PLANNER, None),
    ("planning/task-graph-analyzer.md",                   PLANNER, None),

    ("product/product-manager.md",                        PLANNER, None),

    ("architecture/architect.md",                         PLANNER, None),

    ("quality/test-coordinator.md",                       COORDINATOR, None),
    ("quality/refactoring-coordinator.md",                COORDINATOR, None),
    ("quality/security-auditor.md",                       ANALYSIS, None),
    ("quality/visual-verification-agent.md",              ANALYSIS, None),
    ("quality/performance-auditor-android.md",            ANALYSIS, None),
    ("quality/performance-auditor-csharp.md",             ANALYSIS, None),
    ("quality/performance-auditor-go.md",                 ANALYSIS, None),
    ("quality/performance-auditor-ios.md",                ANALYSIS, None),
    ("quality/performance-auditor-java.md",               ANALYSIS, None),
    ("quality/performance-auditor-php.md",                ANALYSIS, None),
    ("quality/performance-auditor-python.md",             ANALYSIS, None),
    ("quality/performance-auditor-ruby.md",               ANALYSIS, None),
    ("quality/performance-auditor-typescript.md",         ANALYSIS, None),

    ("ux/ux-system-coordinator.md",                       COORDINATOR, None),
    ("ux/design-system-architect.md",                     IMPLEMENTER, None),
    ("ux/design-compliance-validator.md",                 READ_ONLY, None),
];

#[rustfmt::skip]
const DYNAMIC_AGENTS: &[(&str, &[&str])] = &[
    ("backend/api-designer.md",                           IMPLEMENTER),
    ("backend/api-developer-csharp.md",                   IMPLEMENTER),
    ("backend/api-developer-go.md",                       IMPLEMENTER),
    ("backend/api-developer-java.md",                     IMPLEMENTER),
    ("backend/api-developer-php.md",                      IMPLEMENTER),
    ("backend/api-developer-python.md",                   IMPLEMENTER),
    ("backend/api-developer-ruby.md",                     IMPLEMENTER),
    ("backend/api-developer-typescript.md",               IMPLEMENTER),

    ("frontend/frontend-designer.md",                     IMPLEMENTER),
    ("frontend/frontend-developer.md",                    IMPLEMENTER),

    ("database/database-designer.md",                     IMPLEMENTER),
    ("database/database-developer-android.md",            IMPLEMENTER),
    ("database/database-developer-csharp.md",             IMPLEMENTER),
    ("database/database-developer-go.md",                 IMPLEMENTER),
    ("database/database-developer-ios.md",                IMPLEMENTER),
    ("database/database-developer-java.md",               IMPLEMENTER),
    ("database/database-developer-php.md",                IMPLEMENTER),
    ("database/database-developer-python.md",             IMPLEMENTER),
    ("database/database-developer-ruby.md",               IMPLEMENTER),
    ("database/database-developer-typescript.md",         IMPLEMENTER),

    ("mobile/android-designer.md",                        IMPLEMENTER),
    ("mobile/android-developer.md",                       IMPLEMENTER),
    ("mobile/ios-designer.md",                            IMPLEMENTER),
    ("mobile/ios-developer.md",                           IMPLEMENTER),
    ("mobile/flutter-developer.md",                       IMPLEMENTER),
    ("mobile/react-native-developer.md",                  IMPLEMENTER),

    ("python/python-developer-generic.md",                IMPLEMENTER),

    ("scripting/shell-developer.md",                      IMPLEMENTER),
    ("scripting/powershell-developer.md",                 IMPLEMENTER),

    ("data-ai/data-engineer.md",                          IMPLEMENTER),
    ("data-ai/ml-engineer.md",                            IMPLEMENTER),

    ("devops/cicd-specialist.md",                         IMPLEMENTER),
    ("devops/docker-specialist.md",                       IMPLEMENTER),
    ("devops/kubernetes-specialist.md",                   IMPLEMENTER),
    ("devops/mobile-cicd-specialist.md",                  IMPLEMENTER),
    ("devops/terraform-specialist.md",                    IMPLEMENTER),

    ("infrastructure/configuration-manager.md",           IMPLEMENTER),

    ("sre/platform-engineer.md",                          IMPLEMENTER),
    ("sre/site-reliability-engineer.md",                  IMPLEMENTER),

    ("specialized/observability-engineer.md",             IMPLEMENTER),

    ("accessibility/accessibility-specialist.md",         IMPLEMENTER),
    ("accessibility/mobile-accessibility-specialist.md",  IMPLEMENTER),

    ("ux/ux-specialist-web.md",                           IMPLEMENTER),
    ("ux/ux-specialist-mobile.md",                        IMPLEMENTER),
    ("ux/ux-specialist-desktop.md",                       IMPLEMENTER),
    ("ux/design-system-orchestrator.md",                  IMPLEMENTER_COORDINATOR),
    ("ux/color-palette-specialist.md",                    IMPLEMENTER),
    ("ux/typography-specialist.md",                       IMPLEMENTER),
    ("ux/ui-style-curator.md",                            IMPLEMENTER),
    ("ux/data-visualization-designer.md",                 IMPLEMENTER),
    ("ux/design-drift-detector.md",                       ANALYSIS),

    ("quality/test-writer.md",                            IMPLEMENTER),
    ("quality/unit-test-writer-csharp.md",                IMPLEMENTER),
    ("quality/unit-test-writer-go.md",                    IMPLEMENTER),
    ("quality/unit-test-writer-java.md",                  IMPLEMENTER),
    ("quality/unit-test-writer-php.md",                   IMPLEMENTER),
    ("quality/unit-test-writer-python.md",                IMPLEMENTER),
    ("quality/unit-test-writer-ruby.md",                  IMPLEMENTER),
    ("quality/unit-test-writer-typescript.md",            IMPLEMENTER),
    ("quality/e2e-tester.md",                             IMPLEMENTER),
    ("quality/mobile-test-writer.md",                     IMPLEMENTER),
    ("quality/mobile-e2e-tester.md",                      IMPLEMENTER),
    ("quality/runtime-verifier.md",                       ANALYSIS),
    ("quality/documentation-coordinator.md",              IMPLEMENTER),

    ("devrel/developer-advocate.md",                      IMPLEMENTER),

    ("support/dependency-manager.md",                     IMPLEMENTER),
];

/// Build the built-in policy table.
///
/// Fails if an agent is listed twice or in both classes.
pub fn builtin() -> Result<PolicyTable> {
    let mut builder = PolicyTable::builder();

    for (identifier, tools, memory) in FIXED_AGENTS {
        let mut policy = FixedPolicy::new(tools.iter().copied());
        policy.memory_scope = *memory;
        builder = builder.fixed(*identifier, policy);
    }

    for (identifier, tools) in DYNAMIC_AGENTS {
        builder = builder.dynamic(*identifier, DynamicPolicy::new(tools.iter().copied()));
    }

    builder.build()
}
