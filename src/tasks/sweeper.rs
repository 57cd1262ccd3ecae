//! Expiry Sweeper Task
//!
//! Background task that periodically removes stale entries from both
//! in-memory cache stores, so memory is reclaimed without requiring a `get`
//! to trigger cleanup. Expired entries are otherwise left in place by reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SessionCache;

/// Spawns the periodic expiry sweep over both cache stores.
///
/// The task sleeps for `interval` between runs and removes every entry older
/// than its store's TTL. It holds the cache write lock only for the duration
/// of the in-memory sweep itself, never across I/O.
///
/// # Returns
/// A JoinHandle owned by the caller, aborted during graceful shutdown — the
/// sweep is an explicitly cancellable task, not a fire-and-forget interval.
pub fn spawn_sweeper_task(
    cache: Arc<RwLock<SessionCache>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting expiry sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let (api_removed, asset_removed) = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if api_removed > 0 || asset_removed > 0 {
                info!(api_removed, asset_removed, "expiry sweep removed stale entries");
            } else {
                debug!("expiry sweep found no stale entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn short_ttl_cache() -> Arc<RwLock<SessionCache>> {
        Arc::new(RwLock::new(SessionCache::new(
            Duration::from_millis(50),
            Duration::from_secs(86_400),
            crate::cache::system_clock(),
        )))
    }

    #[tokio::test]
    async fn test_sweeper_removes_stale_entries() {
        let cache = short_ttl_cache();
        {
            let mut cache_guard = cache.write().await;
            cache_guard.set_api("stale_soon".to_string(), json!("v"));
        }

        let handle = spawn_sweeper_task(cache.clone(), Duration::from_millis(100));

        // Wait for the entry to go stale and the sweep to run.
        tokio::time::sleep(Duration::from_millis(250)).await;

        {
            let cache_guard = cache.read().await;
            assert_eq!(cache_guard.api_len(), 0, "stale entry should be swept");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_fresh_entries() {
        let cache = Arc::new(RwLock::new(SessionCache::new(
            Duration::from_secs(300),
            Duration::from_secs(86_400),
            crate::cache::system_clock(),
        )));
        {
            let mut cache_guard = cache.write().await;
            cache_guard.set_api("long_lived".to_string(), json!("v"));
        }

        let handle = spawn_sweeper_task(cache.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(150)).await;

        {
            let mut cache_guard = cache.write().await;
            assert_eq!(cache_guard.get_api("long_lived"), Some(json!("v")));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let cache = short_ttl_cache();

        let handle = spawn_sweeper_task(cache, Duration::from_millis(50));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "task should be finished after abort");
    }
}
