//! Policy types for agent frontmatter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution tier written for fixed agents that have no `model` field yet
pub const DEFAULT_MODEL: &str = "sonnet";

/// Policy class of an agent document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyClass {
    /// Keeps an explicit `model`; not overridden at run time
    Fixed,
    /// `model` is removed so the caller injects it at run time
    Dynamic,
}

impl PolicyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyClass::Fixed => "fixed",
            PolicyClass::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for PolicyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence scope for an agent's working memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryScope {
    User,
    Project,
    Local,
}

impl MemoryScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryScope::User => "user",
            MemoryScope::Project => "project",
            MemoryScope::Local => "local",
        }
    }
}

impl fmt::Display for MemoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of capability (tool) names.
///
/// Authoring order is kept; a repeated name is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Capabilities(Vec<String>);

impl Capabilities {
    /// Render as the `tools` field value
    pub fn render(&self) -> String {
        self.0.join(", ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Capabilities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in iter {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self(names)
    }
}

impl From<Vec<String>> for Capabilities {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<Capabilities> for Vec<String> {
    fn from(caps: Capabilities) -> Self {
        caps.0
    }
}

/// Policy for an agent that keeps its own `model`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPolicy {
    #[serde(rename = "tools")]
    pub capabilities: Capabilities,

    #[serde(rename = "memory", default, skip_serializing_if = "Option::is_none")]
    pub memory_scope: Option<MemoryScope>,
}

impl FixedPolicy {
    pub fn new<S: Into<String>>(tools: impl IntoIterator<Item = S>) -> Self {
        Self {
            capabilities: tools.into_iter().collect(),
            memory_scope: None,
        }
    }

    pub fn with_memory(mut self, scope: MemoryScope) -> Self {
        self.memory_scope = Some(scope);
        self
    }
}

/// Policy for an agent whose `model` is injected by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicPolicy {
    #[serde(rename = "tools")]
    pub capabilities: Capabilities,
}

impl DynamicPolicy {
    pub fn new<S: Into<String>>(tools: impl IntoIterator<Item = S>) -> Self {
        Self {
            capabilities: tools.into_iter().collect(),
        }
    }
}

/// Result of looking up a document identifier in the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Fixed(&'a FixedPolicy),
    Dynamic(&'a DynamicPolicy),
    Uncategorized,
}

impl Classification<'_> {
    /// Policy class, or `None` when uncategorized
    pub fn class(&self) -> Option<PolicyClass> {
        match self {
            Classification::Fixed(_) => Some(PolicyClass::Fixed),
            Classification::Dynamic(_) => Some(PolicyClass::Dynamic),
            Classification::Uncategorized => None,
        }
    }

    pub fn capabilities(&self) -> Option<&Capabilities> {
        match self {
            Classification::Fixed(p) => Some(&p.capabilities),
            Classification::Dynamic(p) => Some(&p.capabilities),
            Classification::Uncategorized => None,
        }
    }

    pub fn is_categorized(&self) -> bool {
        !matches!(self, Classification::Uncategorized)
    }
}
