//! HeaderMerger - Combine existing header fields with policy fields
//!
//! Each policy class is expressed as an ordered list of [`FieldRule`]s and a
//! single loop applies them, so the merge itself never branches on the class.

use shared::{keys, Classification, HeaderFields, DEFAULT_MODEL};

/// How one output field is derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Keep the existing value, or write `default` when absent
    Carry { key: &'static str, default: String },
    /// Always write `value`, whatever the document had
    Set { key: &'static str, value: String },
    /// Never emit `key`
    Remove { key: &'static str },
}

impl FieldRule {
    pub fn key(&self) -> &'static str {
        match self {
            FieldRule::Carry { key, .. }
            | FieldRule::Set { key, .. }
            | FieldRule::Remove { key } => *key,
        }
    }
}

/// Produces the final header field set for a classified document
#[derive(Debug, Clone)]
pub struct HeaderMerger {
    default_model: String,
}

impl HeaderMerger {
    /// Create a merger using the standard default tier
    pub fn new() -> Self {
        Self::with_default_model(DEFAULT_MODEL)
    }

    /// Create a merger with a custom default tier for fixed agents
    pub fn with_default_model(default_model: impl Into<String>) -> Self {
        Self {
            default_model: default_model.into(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Rules for a classification. `None` means the merge is refused.
    pub fn rules_for(&self, classification: &Classification<'_>) -> Option<Vec<FieldRule>> {
        let mut rules = vec![
            FieldRule::Carry {
                key: keys::NAME,
                default: String::new(),
            },
            FieldRule::Carry {
                key: keys::DESCRIPTION,
                default: String::new(),
            },
        ];

        match classification {
            Classification::Fixed(policy) => {
                rules.push(FieldRule::Carry {
                    key: keys::MODEL,
                    default: self.default_model.clone(),
                });
                rules.push(FieldRule::Set {
                    key: keys::TOOLS,
                    value: policy.capabilities.render(),
                });
                rules.push(match policy.memory_scope {
                    Some(scope) => FieldRule::Set {
                        key: keys::MEMORY,
                        value: scope.to_string(),
                    },
                    None => FieldRule::Remove { key: keys::MEMORY },
                });
            }
            Classification::Dynamic(policy) => {
                rules.push(FieldRule::Remove { key: keys::MODEL });
                rules.push(FieldRule::Set {
                    key: keys::TOOLS,
                    value: policy.capabilities.render(),
                });
            }
            Classification::Uncategorized => return None,
        }

        Some(rules)
    }

    /// Merge existing fields for a classification. `None` when uncategorized.
    pub fn merge(
        &self,
        existing: &HeaderFields,
        classification: &Classification<'_>,
    ) -> Option<HeaderFields> {
        let rules = self.rules_for(classification)?;
        Some(apply_rules(existing, &rules))
    }
}

impl Default for HeaderMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply rules in order. Keys without a rule are not carried over.
pub fn apply_rules(existing: &HeaderFields, rules: &[FieldRule]) -> HeaderFields {
    let mut merged = HeaderFields::new();

    for rule in rules {
        match rule {
            FieldRule::Carry { key, default } => {
                let value = existing.get(key).unwrap_or(default.as_str());
                merged.insert(*key, value);
            }
            FieldRule::Set { key, value } => {
                merged.insert(*key, value.as_str());
            }
            FieldRule::Remove { key } => {
                merged.remove(key);
            }
        }
    }

    merged
}
