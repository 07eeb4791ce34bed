//! Header field set - ordered flat key/value pairs from a frontmatter block

/// Well-known frontmatter keys
pub mod keys {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const MODEL: &str = "model";
    pub const TOOLS: &str = "tools";
    pub const MEMORY: &str = "memory";

    /// Serialization priority; any other key follows in its own order
    pub const PRIORITY: [&str; 5] = [NAME, DESCRIPTION, MODEL, TOOLS, MEMORY];
}

/// Ordered mapping from field name to scalar value.
///
/// Keeps insertion order. Inserting an existing key replaces its value but
/// keeps the key at its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    entries: Vec<(String, String)>,
}

impl HeaderFields {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace a field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate fields in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = HeaderFields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}
