//! Storage Module
//!
//! Synchronous, string-keyed persistent storage shared by the cache and any
//! other consumer of the same physical store.

mod file;
mod memory;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

// == Storage Error ==
/// Failure reported by a store backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The write would push the store past its byte quota
    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota} bytes")]
    QuotaExceeded { needed: usize, quota: usize },

    /// The backing file could not be read or written
    #[error("Storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The store refused access altogether
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// == Persistent Store ==
/// Raw string store. Values are never interpreted.
///
/// `key_at` indexes into the current key set; indices are only stable until
/// the next mutation, so callers collect keys before removing any of them.
pub trait PersistentStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Number of keys currently stored.
    fn key_count(&self) -> Result<usize, StorageError>;

    /// Key at position `index`, or `None` past the end.
    fn key_at(&self, index: usize) -> Result<Option<String>, StorageError>;

    /// Every key, in `key_at` order. Backends with cheap iteration should
    /// override the index walk.
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let count = self.key_count()?;
        let mut keys = Vec::with_capacity(count);
        for index in 0..count {
            if let Some(key) = self.key_at(index)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// Store chosen at runtime.
pub type BoxedStore = Box<dyn PersistentStore + Send>;

impl<S: PersistentStore + ?Sized> PersistentStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn key_count(&self) -> Result<usize, StorageError> {
        (**self).key_count()
    }

    fn key_at(&self, index: usize) -> Result<Option<String>, StorageError> {
        (**self).key_at(index)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

// == Prefix Scan ==
/// Collects every key starting with `prefix`.
pub fn keys_with_prefix<S: PersistentStore + ?Sized>(
    store: &S,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut keys = store.keys()?;
    keys.retain(|key| key.starts_with(prefix));
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_with_prefix_filters_foreign_keys() {
        let mut store = MemoryStore::new();
        store.set("app_a", "1").unwrap();
        store.set("other", "2").unwrap();
        store.set("app_b", "3").unwrap();

        let keys = keys_with_prefix(&store, "app_").unwrap();
        assert_eq!(keys, vec!["app_a".to_string(), "app_b".to_string()]);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: BoxedStore = Box::new(MemoryStore::new());
        store.set("key", "value").unwrap();

        assert_eq!(store.get("key").unwrap(), Some("value".to_string()));
        assert_eq!(store.key_count().unwrap(), 1);
        assert_eq!(store.key_at(0).unwrap(), Some("key".to_string()));

        store.remove("key").unwrap();
        assert_eq!(store.key_count().unwrap(), 0);
    }

    /// Store exposing only the indexed primitives.
    struct IndexedStore(Vec<(String, String)>);

    impl PersistentStore for IndexedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.retain(|(k, _)| k != key);
            self.0.push((key.to_string(), value.to_string()));
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.0.retain(|(k, _)| k != key);
            Ok(())
        }

        fn key_count(&self) -> Result<usize, StorageError> {
            Ok(self.0.len())
        }

        fn key_at(&self, index: usize) -> Result<Option<String>, StorageError> {
            Ok(self.0.get(index).map(|(k, _)| k.clone()))
        }
    }

    #[test]
    fn test_default_keys_walks_indices() {
        let mut store = IndexedStore(Vec::new());
        store.set("app_b", "1").unwrap();
        store.set("other", "2").unwrap();
        store.set("app_a", "3").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["app_b", "other", "app_a"]);
        assert_eq!(keys_with_prefix(&store, "app_").unwrap(), vec!["app_b", "app_a"]);
    }
}
