//! Periodic Sweep Task
//!
//! Background task that periodically removes expired cache entries, in
//! addition to the sweeps triggered by writes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, StrokeCache};
use crate::storage::PersistentStore;

/// Spawns a background task that sweeps the cache every
/// `cleanup_interval_secs` seconds.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(state.cache().clone(), 3600);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<S, C>(
    cache: Arc<Mutex<StrokeCache<S, C>>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    S: PersistentStore + Send + 'static,
    C: Clock + Send + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.lock().await.sweep_expired();

            if removed > 0 {
                info!("Periodic sweep: removed {} stale entries", removed);
            } else {
                debug!("Periodic sweep: nothing to remove");
            }
        }
    })
}
