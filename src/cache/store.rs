//! Stroke Cache Module
//!
//! Persistent, write-time TTL cache for per-character stroke data, layered
//! over a shared `PersistentStore`.
//!
//! The cache is advisory: every storage or decoding fault is logged and
//! reported to the caller as a miss (for `lookup`) or a no-op (for `store`).

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::entry::{self, decode_timestamp};
use crate::cache::{
    select_for_eviction, CacheConfig, CacheStats, Clock, ExpiryPolicy, SweepScheduler,
    SystemClock,
};
use crate::storage::{keys_with_prefix, PersistentStore, StorageError};

/// Classification of a stored value during a sweep.
enum Staleness {
    Fresh,
    Expired,
    Corrupt,
}

// == Stroke Cache ==
/// Cache façade. All entry state lives in the backend; the instance itself
/// only holds configuration, the sweep sampler and counters.
#[derive(Debug)]
pub struct StrokeCache<S, C = SystemClock> {
    backend: S,
    config: CacheConfig,
    expiry: ExpiryPolicy,
    scheduler: SweepScheduler,
    stats: CacheStats,
    clock: C,
}

impl<S: PersistentStore> StrokeCache<S, SystemClock> {
    // == Constructor ==
    /// Creates a cache over `backend` using wall-clock time.
    pub fn new(backend: S, config: CacheConfig) -> Self {
        Self::with_clock(backend, config, SystemClock)
    }
}

impl<S: PersistentStore, C: Clock> StrokeCache<S, C> {
    /// Creates a cache with an explicit time source.
    pub fn with_clock(backend: S, config: CacheConfig, clock: C) -> Self {
        Self {
            backend,
            expiry: ExpiryPolicy::new(config.ttl_ms),
            scheduler: SweepScheduler::new(config.sweep_probability),
            stats: CacheStats::new(),
            config,
            clock,
        }
    }

    /// Replaces the sweep scheduler, e.g. with a seeded one.
    pub fn with_scheduler(mut self, scheduler: SweepScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Direct access to the shared store, for consumers outside the namespace.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    // == Lookup ==
    /// Returns the cached payload for `id` if a fresh, decodable entry exists.
    ///
    /// Corrupt and expired entries are removed on the way out.
    pub fn lookup<T: DeserializeOwned>(&mut self, id: &str) -> Option<T> {
        let key = self.config.namespace.stored_key(id);

        let raw = match self.backend.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.stats.record_miss();
                return None;
            }
            Err(e) => {
                self.storage_failure("read", &key, &e);
                self.stats.record_miss();
                return None;
            }
        };

        let entry = match entry::decode::<T>(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding corrupt cache entry {}: {}", key, e);
                if self.discard(&key) {
                    self.stats.record_corrupt();
                }
                self.stats.record_miss();
                return None;
            }
        };

        if self.expiry.is_expired(entry.timestamp, self.clock.now_ms()) {
            debug!("Cache entry {} expired", key);
            if self.discard(&key) {
                self.stats.record_expired();
            }
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        Some(entry.payload)
    }

    // == Store ==
    /// Writes `payload` for `id` stamped with the current time, replacing any
    /// previous entry.
    ///
    /// Order: full sweep of stale entries, then eviction down to
    /// `capacity - 1` other live entries, then the write. The new entry is
    /// never an eviction candidate.
    pub fn store<T: Serialize>(&mut self, id: &str, payload: &T) {
        let key = self.config.namespace.stored_key(id);

        self.sweep_expired();

        let encoded = match entry::encode(payload, self.clock.now_ms()) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Not caching {}: {}", key, e);
                return;
            }
        };

        self.make_room_for(&key);

        match self.backend.set(&key, &encoded) {
            Ok(()) => debug!("Cached {} ({} bytes)", key, encoded.len()),
            Err(e) => self.storage_failure("write", &key, &e),
        }
    }

    // == Remove ==
    /// Removes the entry for `id`. Returns true if one was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let key = self.config.namespace.stored_key(id);

        match self.backend.get(&key) {
            Ok(Some(_)) => self.discard(&key),
            Ok(None) => false,
            Err(e) => {
                self.storage_failure("read", &key, &e);
                false
            }
        }
    }

    // == Maintain ==
    /// Runs a sweep with the configured probability. Returns true if it ran.
    pub fn maintain(&mut self) -> bool {
        if self.scheduler.roll() {
            self.sweep_expired();
            true
        } else {
            false
        }
    }

    // == Sweep Expired ==
    /// Removes every expired or undecodable entry in the namespace.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let keys = match self.namespaced_keys() {
            Ok(keys) => keys,
            Err(e) => {
                let prefix = self.config.namespace.key_prefix();
                self.storage_failure("enumerate", &prefix, &e);
                return 0;
            }
        };

        let now = self.clock.now_ms();
        let mut removed = 0;

        for key in keys {
            let raw = match self.backend.get(&key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    self.storage_failure("read", &key, &e);
                    continue;
                }
            };

            match self.classify(&raw, now) {
                Staleness::Fresh => {}
                Staleness::Expired => {
                    if self.discard(&key) {
                        self.stats.record_expired();
                        removed += 1;
                    }
                }
                Staleness::Corrupt => {
                    if self.discard(&key) {
                        self.stats.record_corrupt();
                        removed += 1;
                    }
                }
            }
        }

        self.stats.record_sweep();
        if removed > 0 {
            info!("Cache sweep: removed {} stale entries", removed);
        } else {
            debug!("Cache sweep: no stale entries found");
        }
        removed
    }

    // == Enumeration ==
    /// Raw ids currently stored under the namespace, in store order.
    pub fn ids(&mut self) -> Vec<String> {
        match self.namespaced_keys() {
            Ok(keys) => keys
                .iter()
                .filter_map(|key| self.config.namespace.raw_id(key))
                .map(str::to_string)
                .collect(),
            Err(e) => {
                let prefix = self.config.namespace.key_prefix();
                self.storage_failure("enumerate", &prefix, &e);
                Vec::new()
            }
        }
    }

    /// Number of entries under the namespace, stale ones included.
    pub fn len(&mut self) -> usize {
        match self.namespaced_keys() {
            Ok(keys) => keys.len(),
            Err(e) => {
                let prefix = self.config.namespace.key_prefix();
                self.storage_failure("enumerate", &prefix, &e);
                0
            }
        }
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    // == Stats ==
    pub fn stats(&mut self) -> CacheStats {
        let total = self.len();
        let mut stats = self.stats.clone();
        stats.set_total_entries(total);
        stats
    }

    // == Internals ==
    fn namespaced_keys(&self) -> Result<Vec<String>, StorageError> {
        keys_with_prefix(&self.backend, &self.config.namespace.key_prefix())
    }

    fn classify(&self, raw: &str, now: u64) -> Staleness {
        match decode_timestamp(raw) {
            Ok(timestamp) if self.expiry.is_expired(timestamp, now) => Staleness::Expired,
            Ok(_) => Staleness::Fresh,
            Err(_) => Staleness::Corrupt,
        }
    }

    /// Evicts the oldest entries other than `target` until at most
    /// `capacity - 1` of them remain.
    fn make_room_for(&mut self, target: &str) {
        let keys = match self.namespaced_keys() {
            Ok(keys) => keys,
            Err(e) => {
                let prefix = self.config.namespace.key_prefix();
                self.storage_failure("enumerate", &prefix, &e);
                return;
            }
        };

        let mut limit = self.config.capacity.saturating_sub(1);
        if keys.iter().filter(|key| key.as_str() != target).count() <= limit {
            return;
        }

        let mut candidates: Vec<(String, Option<u64>)> = Vec::new();
        for key in keys.into_iter().filter(|key| key != target) {
            match self.backend.get(&key) {
                // Undecodable entries sort as oldest
                Ok(Some(raw)) => {
                    let timestamp = decode_timestamp(&raw).ok().flatten();
                    candidates.push((key, timestamp));
                }
                Ok(None) => {}
                Err(e) => {
                    // Age unknown: kept, but still occupies a slot
                    self.storage_failure("read", &key, &e);
                    limit = limit.saturating_sub(1);
                }
            }
        }

        let victims = select_for_eviction(&candidates, limit);
        let mut evicted = 0;
        for key in &victims {
            if self.discard(key) {
                evicted += 1;
            }
        }

        self.stats.record_evictions(evicted);
        debug!("Evicted {} entries to make room for {}", evicted, target);
    }

    /// Removes a stored key, containing any failure.
    fn discard(&mut self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(e) => {
                self.storage_failure("remove", key, &e);
                false
            }
        }
    }

    fn storage_failure(&mut self, operation: &str, key: &str, error: &StorageError) {
        warn!("Cache {} failed for {}: {}", operation, key, error);
        self.stats.record_storage_failure();
    }
}
