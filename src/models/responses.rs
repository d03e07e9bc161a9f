//! Response DTOs for the character service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::loader::Source;

/// Response body for GET /characters/:id
#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponse {
    /// The requested character
    pub character: String,
    /// Whether the data came from the cache or the remote source
    pub source: Source,
    /// hanzi-writer stroke data
    pub data: Value,
}

impl CharacterResponse {
    pub fn new(character: impl Into<String>, source: Source, data: Value) -> Self {
        Self {
            character: character.into(),
            source,
            data,
        }
    }
}

/// Response body for GET /cache/:id
#[derive(Debug, Clone, Serialize)]
pub struct CachedResponse {
    pub character: String,
    pub data: Value,
}

impl CachedResponse {
    pub fn new(character: impl Into<String>, data: Value) -> Self {
        Self {
            character: character.into(),
            data,
        }
    }
}

/// Response body for PUT and DELETE on /cache/:id
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
    /// The character acted on
    pub character: String,
}

impl MessageResponse {
    pub fn stored(character: impl Into<String>) -> Self {
        let character = character.into();
        Self {
            message: format!("Character '{}' cached", character),
            character,
        }
    }

    pub fn removed(character: impl Into<String>) -> Self {
        let character = character.into();
        Self {
            message: format!("Character '{}' removed from cache", character),
            character,
        }
    }
}

/// Response body for POST /cache/sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    /// Entries removed by this sweep
    pub removed: usize,
    /// Entries left afterwards
    pub remaining: usize,
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Configured capacity
    pub capacity: usize,
    /// Configured TTL in milliseconds
    pub ttl_ms: u64,
}

impl StatsResponse {
    pub fn new(stats: CacheStats, capacity: usize, ttl_ms: u64) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            capacity,
            ttl_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_character_response_serialize() {
        let resp = CharacterResponse::new("永", Source::Remote, json!({"strokes": []}));
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["character"], "永");
        assert_eq!(json["source"], "remote");
        assert!(json["data"]["strokes"].is_array());
    }

    #[test]
    fn test_message_responses() {
        let stored = MessageResponse::stored("永");
        assert!(stored.message.contains("cached"));

        let removed = MessageResponse::removed("永");
        assert!(removed.message.contains("removed"));
        assert_eq!(removed.character, "永");
    }

    #[test]
    fn test_stats_response_flattens_counters() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.set_total_entries(4);

        let json = serde_json::to_value(StatsResponse::new(stats, 100, 1000)).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["total_entries"], 4);
        assert_eq!(json["hit_rate"], 0.5);
        assert_eq!(json["capacity"], 100);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
