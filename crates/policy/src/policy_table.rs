//! PolicyTable - Document identifier to policy class lookup

use serde::Deserialize;
use shared::{
    Classification, DynamicPolicy, FixedPolicy, PolicyClass, PolicyConflictError, Result,
    SyncError,
};
use std::collections::BTreeMap;
use std::path::Path;

/// Immutable mapping from document identifier to policy entry.
///
/// The fixed and dynamic sets are disjoint; this is checked when the table is
/// built and can't be broken afterwards.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    fixed: BTreeMap<String, FixedPolicy>,
    dynamic: BTreeMap<String, DynamicPolicy>,
}

impl PolicyTable {
    /// Start building a table
    pub fn builder() -> PolicyTableBuilder {
        PolicyTableBuilder::default()
    }

    /// Build a table from two authored maps, rejecting shared identifiers
    pub fn from_maps(
        fixed: BTreeMap<String, FixedPolicy>,
        dynamic: BTreeMap<String, DynamicPolicy>,
    ) -> Result<Self> {
        if let Some(identifier) = fixed.keys().find(|id| dynamic.contains_key(*id)) {
            return Err(PolicyConflictError {
                identifier: identifier.clone(),
            }
            .into());
        }
        Ok(Self { fixed, dynamic })
    }

    /// Parse a YAML policy table with `fixed` and `dynamic` sections
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: PolicyFile = serde_yaml::from_str(yaml)?;
        Self::from_maps(file.fixed, file.dynamic)
    }

    /// Load a YAML policy table from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Classify a document identifier. Unknown identifiers are uncategorized.
    pub fn classify(&self, identifier: &str) -> Classification<'_> {
        if let Some(policy) = self.fixed.get(identifier) {
            Classification::Fixed(policy)
        } else if let Some(policy) = self.dynamic.get(identifier) {
            Classification::Dynamic(policy)
        } else {
            Classification::Uncategorized
        }
    }

    /// Policy class of an identifier, if categorized
    pub fn class_of(&self, identifier: &str) -> Option<PolicyClass> {
        self.classify(identifier).class()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.fixed.contains_key(identifier) || self.dynamic.contains_key(identifier)
    }

    pub fn fixed_len(&self) -> usize {
        self.fixed.len()
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.len()
    }

    /// Total number of categorized identifiers
    pub fn len(&self) -> usize {
        self.fixed.len() + self.dynamic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.dynamic.is_empty()
    }

    /// Fixed entries, sorted by identifier
    pub fn fixed_entries(&self) -> impl Iterator<Item = (&str, &FixedPolicy)> {
        self.fixed.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Dynamic entries, sorted by identifier
    pub fn dynamic_entries(&self) -> impl Iterator<Item = (&str, &DynamicPolicy)> {
        self.dynamic.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All categorized identifiers, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .fixed
            .keys()
            .chain(self.dynamic.keys())
            .map(|s| s.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// YAML layout of an external policy table
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
    #[serde(default)]
    fixed: BTreeMap<String, FixedPolicy>,
    #[serde(default)]
    dynamic: BTreeMap<String, DynamicPolicy>,
}

/// Collects entries and validates them into a [`PolicyTable`]
#[derive(Debug, Default)]
pub struct PolicyTableBuilder {
    fixed: Vec<(String, FixedPolicy)>,
    dynamic: Vec<(String, DynamicPolicy)>,
}

impl PolicyTableBuilder {
    /// Register a fixed-policy agent
    pub fn fixed(mut self, identifier: impl Into<String>, policy: FixedPolicy) -> Self {
        self.fixed.push((identifier.into(), policy));
        self
    }

    /// Register a dynamic-policy agent
    pub fn dynamic(mut self, identifier: impl Into<String>, policy: DynamicPolicy) -> Self {
        self.dynamic.push((identifier.into(), policy));
        self
    }

    /// Validate and freeze the table
    pub fn build(self) -> Result<PolicyTable> {
        let mut fixed = BTreeMap::new();
        for (identifier, policy) in self.fixed {
            if fixed.contains_key(&identifier) {
                return Err(SyncError::DuplicateEntry {
                    identifier,
                    class: PolicyClass::Fixed,
                });
            }
            fixed.insert(identifier, policy);
        }

        let mut dynamic = BTreeMap::new();
        for (identifier, policy) in self.dynamic {
            if dynamic.contains_key(&identifier) {
                return Err(SyncError::DuplicateEntry {
                    identifier,
                    class: PolicyClass::Dynamic,
                });
            }
            dynamic.insert(identifier, policy);
        }

        PolicyTable::from_maps(fixed, dynamic)
    }
}
