//! Character Loader
//!
//! Cache-first access to stroke data: answer from the cache when possible,
//! otherwise fetch remotely and cache the result.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{Clock, StrokeCache, SystemClock};
use crate::fetch::{CharacterSource, FetchError};
use crate::storage::{BoxedStore, PersistentStore};

/// Cache shared between request handlers and background tasks.
pub type SharedCache<S = BoxedStore, C = SystemClock> = Arc<Mutex<StrokeCache<S, C>>>;

/// Where a loaded payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Remote,
}

// == Character Loader ==
pub struct CharacterLoader<S = BoxedStore, C = SystemClock> {
    cache: SharedCache<S, C>,
    source: Arc<dyn CharacterSource>,
}

impl<S, C> Clone for CharacterLoader<S, C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: PersistentStore, C: Clock> CharacterLoader<S, C> {
    pub fn new(cache: SharedCache<S, C>, source: Arc<dyn CharacterSource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &SharedCache<S, C> {
        &self.cache
    }

    // == Load ==
    /// Returns stroke data for `id`.
    ///
    /// The cache lock is released while the remote fetch is in flight. Fetch
    /// errors propagate; cache faults do not.
    pub async fn load(&self, id: &str) -> Result<(Value, Source), FetchError> {
        {
            let mut cache = self.cache.lock().await;
            cache.maintain();
            if let Some(data) = cache.lookup::<Value>(id) {
                debug!("Stroke data for {} served from cache", id);
                return Ok((data, Source::Cache));
            }
        }

        let data = self.source.fetch(id).await?;
        self.cache.lock().await.store(id, &data);

        Ok((data, Source::Remote))
    }
}
