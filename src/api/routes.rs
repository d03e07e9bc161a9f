//! API Routes
//!
//! Configures the Axum router with all character service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    character_handler, delete_cached_handler, get_cached_handler, health_handler,
    put_cached_handler, stats_handler, sweep_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /characters/:id` - Stroke data, cache first then remote
/// - `GET /cache/:id` - Cache-only lookup
/// - `PUT /cache/:id` - Store stroke data explicitly
/// - `DELETE /cache/:id` - Remove a cached character
/// - `POST /cache/sweep` - Remove all expired entries
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/characters/:id", get(character_handler))
        .route("/cache/sweep", post(sweep_handler))
        .route(
            "/cache/:id",
            get(get_cached_handler)
                .put(put_cached_handler)
                .delete(delete_cached_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
