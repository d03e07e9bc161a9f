//! API Module
//!
//! HTTP handlers and routing for the character service REST API.
//!
//! # Endpoints
//! - `GET /characters/:id` - Stroke data, cache first then remote
//! - `GET|PUT|DELETE /cache/:id` - Direct cache access
//! - `POST /cache/sweep` - Remove expired entries
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
