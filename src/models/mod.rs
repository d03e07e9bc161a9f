//! Request and Response models for the character service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing HTTP response bodies and validating request input.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::validate_character;
pub use responses::{
    CachedResponse, CharacterResponse, HealthResponse, MessageResponse, StatsResponse,
    SweepResponse,
};
