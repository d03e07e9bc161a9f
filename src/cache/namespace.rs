//! Cache Namespace
//!
//! Prefix and version tag applied to every stored key. Bumping the version
//! orphans all entries written under the old one.

use std::fmt;

// == Cache Namespace ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheNamespace {
    prefix: String,
    version: String,
}

impl CacheNamespace {
    pub fn new(prefix: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            version: version.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Shared leading part of every stored key: `<prefix>_<version>_`.
    pub fn key_prefix(&self) -> String {
        format!("{}_{}_", self.prefix, self.version)
    }

    /// Stored key for a raw id.
    pub fn stored_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix(), id)
    }

    /// Raw id of a stored key, or None if the key lies outside the namespace.
    pub fn raw_id<'a>(&self, stored_key: &'a str) -> Option<&'a str> {
        stored_key.strip_prefix(&self.key_prefix())
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.prefix, self.version)
    }
}
