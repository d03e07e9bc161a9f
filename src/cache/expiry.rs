//! Expiry Policy
//!
//! Write-time TTL: reads never refresh an entry's age.

// == Expiry Policy ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    ttl_ms: u64,
}

impl ExpiryPolicy {
    pub fn new(ttl_ms: u64) -> Self {
        Self { ttl_ms }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    // == Is Expired ==
    /// True iff `now - timestamp > ttl`. Entries without a timestamp are
    /// always expired; timestamps in the future are not.
    pub fn is_expired(&self, timestamp: Option<u64>, now_ms: u64) -> bool {
        match timestamp {
            Some(written) => now_ms.saturating_sub(written) > self.ttl_ms,
            None => true,
        }
    }
}
