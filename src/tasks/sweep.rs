//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries,
//! independent of request traffic, so cold keys that are never looked up
//! again do not accumulate. Piggybacks a prune of idle rate-limit windows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::ratelimit::RateLimiter;

/// Spawns the periodic expiry sweep.
///
/// The task loops forever, sleeping for the configured interval between
/// passes. Each pass takes the cache write lock, removes expired entries,
/// and drops rate-limit clients whose window has fully elapsed.
///
/// # Returns
/// A JoinHandle used to abort the task during graceful shutdown.
pub fn spawn_sweep_task(
    cache: SharedCache,
    limiter: Arc<RwLock<RateLimiter>>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!("Starting expiry sweep task with interval of {} seconds", interval_secs);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store = cache.write().await;
                store.sweep_expired()
            };
            let pruned = {
                let mut limiter = limiter.write().await;
                limiter.prune_idle()
            };

            if removed > 0 || pruned > 0 {
                info!(removed, pruned, "expiry sweep pass");
            } else {
                debug!("expiry sweep: nothing to reclaim");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use axum::body::Bytes;

    fn shared_cache() -> SharedCache {
        Arc::new(RwLock::new(CacheStore::new(300)))
    }

    fn shared_limiter() -> Arc<RwLock<RateLimiter>> {
        Arc::new(RwLock::new(RateLimiter::new(60, 100)))
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let cache = shared_cache();

        {
            let mut store = cache.write().await;
            store.set(
                "search:/search:q=a".to_string(),
                Bytes::from_static(b"{}"),
                Some(1),
            );
        }

        let handle = spawn_sweep_task(cache.clone(), shared_limiter(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let store = cache.read().await;
            assert!(store.is_empty(), "Expired entry should have been swept");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_preserves_live_entries() {
        let cache = shared_cache();

        {
            let mut store = cache.write().await;
            store.set(
                "config:/config:".to_string(),
                Bytes::from_static(b"{}"),
                Some(3600),
            );
        }

        let handle = spawn_sweep_task(cache.clone(), shared_limiter(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut store = cache.write().await;
            assert!(store.get("config:/config:").is_some(), "Live entry should survive");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let handle = spawn_sweep_task(shared_cache(), shared_limiter(), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
