//! Error types for the character service
//!
//! Provides unified error handling using thiserror. Cache faults never reach
//! this layer; they are contained inside `StrokeCache`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::fetch::FetchError;

// == Service Error Enum ==
/// Unified error type for the HTTP service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Character not cached, or unknown upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Remote character data could not be obtained
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<FetchError> for CacheError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(id) => CacheError::NotFound(format!("No stroke data for '{}'", id)),
            other => CacheError::Upstream(other.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_not_found_maps_to_not_found() {
        let err: CacheError = FetchError::NotFound("永".to_string()).into();
        assert!(matches!(err, CacheError::NotFound(msg) if msg.contains('永')));
    }

    #[test]
    fn test_fetch_failure_maps_to_upstream() {
        let err: CacheError = FetchError::Upstream("status 503".to_string()).into();
        assert!(matches!(err, CacheError::Upstream(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (CacheError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (CacheError::Upstream("x".into()), StatusCode::BAD_GATEWAY),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
