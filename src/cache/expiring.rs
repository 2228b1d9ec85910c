//! Expiring Cache Module
//!
//! Public handle combining the entry store, statistics and the reaper task.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore, StatsSnapshot};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

// == Expiring Cache ==
/// Time-expiring byte cache with a background reaper.
///
/// Entries live for at least `interval` after their last `put` and are removed
/// by the reaper no later than one further `interval` after that. Reads never
/// check age themselves: an entry that is past its interval but has not been
/// swept yet is still returned.
///
/// Share the cache between tasks by wrapping it in an `Arc`. The reaper stops
/// on [`ExpiringCache::shutdown`] or when the cache is dropped.
#[derive(Debug)]
pub struct ExpiringCache {
    store: Arc<RwLock<CacheStore>>,
    stats: Arc<CacheStats>,
    interval: Duration,
    stop: watch::Sender<bool>,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates a cache and starts its reaper.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidInterval`] if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidInterval);
        }

        let store = Arc::new(RwLock::new(CacheStore::new()));
        let stats = Arc::new(CacheStats::new());
        let (stop, stop_rx) = watch::channel(false);
        let handle = spawn_reaper(store.clone(), stats.clone(), interval, stop_rx);

        Ok(Self {
            store,
            stats,
            interval,
            stop,
            reaper: Mutex::new(Some(handle)),
        })
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any previous entry and resetting
    /// its age.
    pub async fn put(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let mut store = self.store.write().await;
        store.put(key.into(), value.into());
    }

    // == Get ==
    /// Returns a copy of the bytes stored under `key`, or `None` if there is
    /// no entry or the reaper has evicted it.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let store = self.store.read().await;
        match store.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Get Or Fetch ==
    /// Cache-aside lookup.
    ///
    /// On a hit the cached bytes are returned and `fetch` is never called. On
    /// a miss `fetch` is awaited; a successful result is stored under `key`
    /// before being returned, a failure is passed through and nothing is
    /// stored.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        fetch: F,
    ) -> std::result::Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<u8>, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!(key, "Cache hit");
            return Ok(value);
        }

        debug!(key, "Cache miss, fetching");
        let value = fetch().await?;
        self.put(key, value.clone()).await;
        Ok(value)
    }

    // == Accessors ==
    /// Returns the TTL and sweep period fixed at construction.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the number of stored entries, including unswept stale ones.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> StatsSnapshot {
        let total_entries = self.len().await;
        self.stats.snapshot(total_entries)
    }

    /// Returns true while the reaper task is alive.
    pub fn reaper_running(&self) -> bool {
        self.reaper
            .lock()
            .map(|guard| guard.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// Entries already stored stay readable but no longer expire. Calling
    /// this more than once is a no-op.
    pub async fn shutdown(&self) {
        let _ = self.stop.send(true);

        let handle = self.reaper.lock().ok().and_then(|mut guard| guard.take());
        if let Some(handle) = handle {
            match handle.await {
                Ok(()) => info!("Cache shut down"),
                Err(err) => warn!(error = %err, "Cache reaper exited abnormally"),
            }
        }
    }
}

impl Drop for ExpiringCache {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
    }
}
