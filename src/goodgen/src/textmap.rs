//! Localized display-name resolution
//!
//! Upstream identifies display strings by opaque hash keys. Not every key has
//! a string in every locale snapshot; absence is a normal outcome that
//! callers turn into a record skip, never a failure.

use std::collections::HashMap;

/// Hash key to localized display string
#[derive(Debug, Clone, Default)]
pub struct TextMap(HashMap<String, String>);

impl TextMap {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self(entries)
    }

    /// Look up a localized name; `None` means "skip this record"
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for TextMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
