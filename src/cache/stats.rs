//! Cache Statistics Module
//!
//! Tracks lookups, removals and contained storage faults.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing usable
    pub misses: u64,
    /// Live entries removed to respect capacity
    pub evictions: u64,
    /// Entries removed because their TTL had elapsed
    pub expired_removed: u64,
    /// Entries removed because they failed to decode
    pub corrupt_removed: u64,
    /// Full sweeps run
    pub sweeps: u64,
    /// Store operations that failed and were contained
    pub storage_failures: u64,
    /// Entries currently under the namespace
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_expired(&mut self) {
        self.expired_removed += 1;
    }

    pub fn record_corrupt(&mut self) {
        self.corrupt_removed += 1;
    }

    pub fn record_sweep(&mut self) {
        self.sweeps += 1;
    }

    pub fn record_storage_failure(&mut self) {
        self.storage_failures += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
