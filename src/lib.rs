//! Hanzi Cache - persistent stroke-data cache for Chinese characters
//!
//! A bounded, write-time TTL cache over a shared string key-value store, plus
//! an HTTP service that loads hanzi-writer stroke data cache-first.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheConfig, StrokeCache};
pub use config::Config;
pub use loader::{CharacterLoader, Source};
pub use tasks::spawn_cleanup_task;
