//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;
use std::str::FromStr;

use crate::cache::{
    CacheConfig, CacheNamespace, DEFAULT_CAPACITY, DEFAULT_PREFIX, DEFAULT_SWEEP_PROBABILITY,
    DEFAULT_TTL_MS, DEFAULT_VERSION,
};

/// Default upstream for hanzi-writer stroke data
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://static.ww93.fun/hanzi-writer-data";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prefix for stored keys
    pub cache_prefix: String,
    /// Namespace version tag; changing it invalidates all entries
    pub cache_version: String,
    /// Entry time-to-live in milliseconds
    pub cache_ttl_ms: u64,
    /// Maximum number of cached characters
    pub cache_capacity: usize,
    /// Per-write sweep probability
    pub sweep_probability: f64,
    /// Path of the JSON store file
    pub storage_path: String,
    /// Store size limit in bytes
    pub storage_quota_bytes: usize,
    /// Base URL of the remote stroke data
    pub remote_base_url: String,
    /// Remote fetch timeout in seconds
    pub fetch_timeout_secs: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Periodic sweep interval in seconds, 0 = disabled
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_PREFIX` (default: hanzi_cache)
    /// - `CACHE_VERSION` (default: v1)
    /// - `CACHE_TTL_MS` (default: 604800000, 7 days)
    /// - `CACHE_CAPACITY` (default: 100)
    /// - `SWEEP_PROBABILITY` (default: 0.1)
    /// - `STORAGE_PATH` (default: hanzi_cache.json)
    /// - `STORAGE_QUOTA_BYTES` (default: 5242880)
    /// - `REMOTE_BASE_URL` (default: https://static.ww93.fun/hanzi-writer-data)
    /// - `FETCH_TIMEOUT_SECS` (default: 10)
    /// - `SERVER_PORT` (default: 3000)
    /// - `CLEANUP_INTERVAL` (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_prefix: env::var("CACHE_PREFIX").unwrap_or(defaults.cache_prefix),
            cache_version: env::var("CACHE_VERSION").unwrap_or(defaults.cache_version),
            cache_ttl_ms: parsed("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            cache_capacity: parsed("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            sweep_probability: parsed("SWEEP_PROBABILITY").unwrap_or(defaults.sweep_probability),
            storage_path: env::var("STORAGE_PATH").unwrap_or(defaults.storage_path),
            storage_quota_bytes: parsed("STORAGE_QUOTA_BYTES")
                .unwrap_or(defaults.storage_quota_bytes),
            remote_base_url: env::var("REMOTE_BASE_URL").unwrap_or(defaults.remote_base_url),
            fetch_timeout_secs: parsed("FETCH_TIMEOUT_SECS").unwrap_or(defaults.fetch_timeout_secs),
            server_port: parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parsed("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Cache parameters, with capacity raised to at least 1 and the sweep
    /// probability clamped to `[0, 1]`.
    pub fn cache_config(&self) -> CacheConfig {
        let sweep_probability = if self.sweep_probability.is_nan() {
            0.0
        } else {
            self.sweep_probability.clamp(0.0, 1.0)
        };

        CacheConfig {
            namespace: CacheNamespace::new(&self.cache_prefix, &self.cache_version),
            ttl_ms: self.cache_ttl_ms,
            capacity: self.cache_capacity.max(1),
            sweep_probability,
        }
    }
}

fn parsed<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_prefix: DEFAULT_PREFIX.to_string(),
            cache_version: DEFAULT_VERSION.to_string(),
            cache_ttl_ms: DEFAULT_TTL_MS,
            cache_capacity: DEFAULT_CAPACITY,
            sweep_probability: DEFAULT_SWEEP_PROBABILITY,
            storage_path: "hanzi_cache.json".to_string(),
            storage_quota_bytes: 5 * 1024 * 1024,
            remote_base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
            fetch_timeout_secs: 10,
            server_port: 3000,
            cleanup_interval: 0,
        }
    }
}
