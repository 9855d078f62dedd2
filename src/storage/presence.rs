//! Key-presence set
//!
//! Derived cache of the encoded keys present in the store file. Never
//! persisted and never trusted until rebuilt from a fresh load.

use std::collections::HashSet;

use super::Record;

/// In-memory membership set of encoded keys
#[derive(Debug, Default, Clone)]
pub struct PresenceSet {
    keys: HashSet<String>,
}

impl PresenceSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with the keys of `records`
    ///
    /// Overwrites rather than merges, so keys removed by another writer
    /// disappear on the next load.
    pub fn rebuild(&mut self, records: &[Record]) {
        self.keys.clear();
        self.keys.extend(records.iter().map(|r| r.key.clone()));
    }

    pub fn contains(&self, encoded_key: &str) -> bool {
        self.keys.contains(encoded_key)
    }

    /// Mark a key present; returns false if it already was
    pub fn insert(&mut self, encoded_key: String) -> bool {
        self.keys.insert(encoded_key)
    }

    /// Mark a key absent; returns false if it already was
    pub fn remove(&mut self, encoded_key: &str) -> bool {
        self.keys.remove(encoded_key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
