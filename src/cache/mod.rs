//! Cache Module
//!
//! Persistent character-data cache with write-time TTL expiry, oldest-first
//! capacity eviction and probabilistic sweeping.

mod clock;
pub mod entry;
mod eviction;
mod expiry;
mod maintenance;
mod namespace;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, DecodeError, EncodeError};
pub use eviction::select_for_eviction;
pub use expiry::ExpiryPolicy;
pub use maintenance::SweepScheduler;
pub use namespace::CacheNamespace;
pub use stats::CacheStats;
pub use store::StrokeCache;

// == Public Constants ==
/// Default namespace prefix
pub const DEFAULT_PREFIX: &str = "hanzi_cache";

/// Default namespace version tag
pub const DEFAULT_VERSION: &str = "v1";

/// Default time-to-live: 7 days in milliseconds
pub const DEFAULT_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 100;

/// Default per-write sweep probability
pub const DEFAULT_SWEEP_PROBABILITY: f64 = 0.1;

// == Cache Config ==
/// Parameters for one cache instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub namespace: CacheNamespace,
    /// Maximum entry age in milliseconds
    pub ttl_ms: u64,
    /// Maximum number of entries kept under the namespace
    pub capacity: usize,
    /// Chance in `[0, 1]` that a write triggers a full sweep
    pub sweep_probability: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: CacheNamespace::new(DEFAULT_PREFIX, DEFAULT_VERSION),
            ttl_ms: DEFAULT_TTL_MS,
            capacity: DEFAULT_CAPACITY,
            sweep_probability: DEFAULT_SWEEP_PROBABILITY,
        }
    }
}
