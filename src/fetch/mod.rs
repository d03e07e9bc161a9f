//! Remote Character Data
//!
//! Source of fresh stroke data consulted on a cache miss.

mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use http::HttpCharacterSource;

// == Fetch Error ==
#[derive(Error, Debug)]
pub enum FetchError {
    /// The upstream has no data for this character
    #[error("Character not found: {0}")]
    NotFound(String),

    /// The upstream answered with a non-success status
    #[error("Upstream responded with {0}")]
    Upstream(String),

    /// The request could not be sent or the response not read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request URL could not be built
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

// == Character Source ==
/// Fetches stroke data for a single character.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Value, FetchError>;
}
