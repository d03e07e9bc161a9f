//! API Handlers
//!
//! HTTP request handlers for each character service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::cache::StrokeCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fetch::{CharacterSource, HttpCharacterSource};
use crate::loader::{CharacterLoader, SharedCache};
use crate::models::{
    validate_character, CachedResponse, CharacterResponse, HealthResponse, MessageResponse,
    StatsResponse, SweepResponse,
};
use crate::storage::{BoxedStore, FileStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub loader: CharacterLoader,
}

impl AppState {
    /// Creates a new AppState around a cache and a remote source.
    pub fn new(cache: StrokeCache<BoxedStore>, source: Arc<dyn CharacterSource>) -> Self {
        Self {
            loader: CharacterLoader::new(Arc::new(Mutex::new(cache)), source),
        }
    }

    /// Creates a new AppState from configuration: a file-backed cache and
    /// an HTTP character source.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.storage_path, Some(config.storage_quota_bytes))?;
        let cache = StrokeCache::new(Box::new(store) as BoxedStore, config.cache_config());
        let source = HttpCharacterSource::new(
            &config.remote_base_url,
            Duration::from_secs(config.fetch_timeout_secs),
        )?;
        Ok(Self::new(cache, Arc::new(source)))
    }

    pub fn cache(&self) -> &SharedCache {
        self.loader.cache()
    }
}

fn checked(id: &str) -> Result<()> {
    match validate_character(id) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for GET /characters/:id
///
/// Serves stroke data from the cache, fetching and caching it on a miss.
pub async fn character_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponse>> {
    checked(&id)?;

    let (data, source) = state.loader.load(&id).await?;
    Ok(Json(CharacterResponse::new(id, source, data)))
}

/// Handler for GET /cache/:id
///
/// Cache-only lookup; never contacts the remote source.
pub async fn get_cached_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CachedResponse>> {
    checked(&id)?;

    let data = state.cache().lock().await.lookup::<Value>(&id);
    match data {
        Some(data) => Ok(Json(CachedResponse::new(id, data))),
        None => Err(CacheError::NotFound(format!("'{}' is not cached", id))),
    }
}

/// Handler for PUT /cache/:id
///
/// Stores the request body as the character's stroke data.
pub async fn put_cached_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<Value>,
) -> Result<Json<MessageResponse>> {
    checked(&id)?;
    if data.is_null() {
        return Err(CacheError::InvalidRequest("Stroke data cannot be null".to_string()));
    }

    state.cache().lock().await.store(&id, &data);
    Ok(Json(MessageResponse::stored(id)))
}

/// Handler for DELETE /cache/:id
pub async fn delete_cached_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    checked(&id)?;

    if state.cache().lock().await.remove(&id) {
        Ok(Json(MessageResponse::removed(id)))
    } else {
        Err(CacheError::NotFound(format!("'{}' is not cached", id)))
    }
}

/// Handler for POST /cache/sweep
///
/// Runs an unconditional expired-entry sweep.
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepResponse> {
    let mut cache = state.cache().lock().await;
    let removed = cache.sweep_expired();

    Json(SweepResponse {
        removed,
        remaining: cache.len(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let mut cache = state.cache().lock().await;
    let stats = cache.stats();
    let config = cache.config();

    Json(StatsResponse::new(stats, config.capacity, config.ttl_ms))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::fetch::FetchError;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedSource;

    #[async_trait]
    impl CharacterSource for FixedSource {
        async fn fetch(&self, id: &str) -> std::result::Result<Value, FetchError> {
            if id == "永" {
                Ok(json!({"strokes": ["M 0 0"]}))
            } else {
                Err(FetchError::NotFound(id.to_string()))
            }
        }
    }

    fn test_state() -> AppState {
        let cache = StrokeCache::new(Box::new(MemoryStore::new()) as BoxedStore, CacheConfig::default());
        AppState::new(cache, Arc::new(FixedSource))
    }

    #[tokio::test]
    async fn test_character_handler_fetches_then_caches() {
        let state = test_state();

        let first = character_handler(State(state.clone()), Path("永".to_string()))
            .await
            .unwrap();
        assert_eq!(first.source, crate::loader::Source::Remote);

        let second = character_handler(State(state), Path("永".to_string()))
            .await
            .unwrap();
        assert_eq!(second.source, crate::loader::Source::Cache);
    }

    #[tokio::test]
    async fn test_character_handler_rejects_non_hanzi() {
        let result = character_handler(State(test_state()), Path("abc".to_string())).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_character_handler_unknown_character() {
        let result = character_handler(State(test_state()), Path("无".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_put_get_delete_cached() {
        let state = test_state();
        let data = json!({"strokes": ["M 5 5"]});

        put_cached_handler(State(state.clone()), Path("字".to_string()), Json(data.clone()))
            .await
            .unwrap();

        let found = get_cached_handler(State(state.clone()), Path("字".to_string()))
            .await
            .unwrap();
        assert_eq!(found.data, data);

        delete_cached_handler(State(state.clone()), Path("字".to_string()))
            .await
            .unwrap();
        let result = get_cached_handler(State(state), Path("字".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_put_rejects_null() {
        let result =
            put_cached_handler(State(test_state()), Path("字".to_string()), Json(Value::Null)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_and_sweep_handlers() {
        let state = test_state();

        let stats = stats_handler(State(state.clone())).await;
        assert_eq!(stats.stats.hits, 0);
        assert_eq!(stats.capacity, 100);

        let sweep = sweep_handler(State(state)).await;
        assert_eq!(sweep.removed, 0);
        assert_eq!(sweep.remaining, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
