//! File-Backed Store
//!
//! Keeps the store in memory and mirrors it to a JSON file after every
//! mutation.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{MemoryStore, PersistentStore, StorageError};

// == File Store ==
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    // == Open ==
    /// Opens the store at `path`, creating it on first write.
    ///
    /// A file that does not parse is logged and treated as empty; it is
    /// replaced on the next successful write.
    pub fn open(path: impl Into<PathBuf>, quota: Option<usize>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Store file {} is unreadable, starting empty: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::Io(e)),
        };

        debug!("Opened store {} with {} keys", path.display(), entries.len());

        Ok(Self {
            path,
            inner: MemoryStore::from_entries(entries, quota),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Persist ==
    /// Writes the whole map to a sibling temp file and renames it into place.
    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(self.inner.entries())
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self.inner.get(key)?;
        self.inner.set(key, value)?;

        if let Err(e) = self.persist() {
            // Roll back so memory and disk agree
            match previous {
                Some(old) => {
                    self.inner.insert_unchecked(key, &old);
                }
                None => {
                    self.inner.take(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let Some(previous) = self.inner.take(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist() {
            self.inner.insert_unchecked(key, &previous);
            return Err(e);
        }
        Ok(())
    }

    fn key_count(&self) -> Result<usize, StorageError> {
        self.inner.key_count()
    }

    fn key_at(&self, index: usize) -> Result<Option<String>, StorageError> {
        self.inner.key_at(index)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.inner.keys()
    }
}
