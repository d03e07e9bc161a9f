//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sweep: Removes expired entries at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
