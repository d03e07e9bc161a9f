//! HTTP character source backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use super::{CharacterSource, FetchError};

/// Fetches `<base_url>/<id>.json`.
#[derive(Debug, Clone)]
pub struct HttpCharacterSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCharacterSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Request URL for `id`, percent-encoded as a single path segment.
    pub fn url_for(&self, id: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(&format!("{}.json", id));
        Ok(url)
    }
}

#[async_trait]
impl CharacterSource for HttpCharacterSource {
    async fn fetch(&self, id: &str) -> Result<Value, FetchError> {
        let url = self.url_for(id)?;
        debug!("Fetching stroke data from {}", url);

        let response = self.client.get(url).send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.json::<Value>().await?),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(id.to_string())),
            status => Err(FetchError::Upstream(status.to_string())),
        }
    }
}
