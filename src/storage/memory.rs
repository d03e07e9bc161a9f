//! In-Memory Store
//!
//! Ordered key-value map with an optional byte quota.

use std::collections::BTreeMap;

use super::{PersistentStore, StorageError};

// == Memory Store ==
/// Keys are kept sorted so that `key_at` is deterministic.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    /// Maximum total size of keys and values in bytes, None = unlimited
    quota: Option<usize>,
    used: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store limited to `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Builds a store from existing contents. The quota is not enforced
    /// against what is already present, only against later writes.
    pub fn from_entries(entries: BTreeMap<String, String>, quota: Option<usize>) -> Self {
        let used = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
        Self {
            entries,
            quota,
            used,
        }
    }

    /// Current contents.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Bytes in use by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.used
    }

    /// Inserts without quota checks and returns the displaced value.
    pub(crate) fn insert_unchecked(&mut self, key: &str, value: &str) -> Option<String> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        match &previous {
            Some(old) => self.used = self.used - old.len() + value.len(),
            None => self.used += key.len() + value.len(),
        }
        previous
    }

    /// Removes and returns the previous value.
    pub(crate) fn take(&mut self, key: &str) -> Option<String> {
        let previous = self.entries.remove(key);
        if let Some(old) = &previous {
            self.used -= key.len() + old.len();
        }
        previous
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let freed = self
                .entries
                .get(key)
                .map(|old| key.len() + old.len())
                .unwrap_or(0);
            let needed = self.used - freed + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        self.insert_unchecked(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.take(key);
        Ok(())
    }

    fn key_count(&self) -> Result<usize, StorageError> {
        Ok(self.entries.len())
    }

    fn key_at(&self, index: usize) -> Result<Option<String>, StorageError> {
        Ok(self.entries.keys().nth(index).cloned())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.keys().cloned().collect())
    }
}
