//! Cache Reaper Task
//!
//! Background task that periodically evicts entries older than the cache
//! interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};

/// Spawns the reaper for `store`.
///
/// The first sweep runs one full `interval` after spawning, then once per
/// `interval`. Each sweep takes the write lock, reads the clock once, and
/// removes every entry whose age is at least `interval` as of that instant.
///
/// The task exits when `stop` receives a value or its sender is dropped.
///
/// # Arguments
/// * `store` - Shared entry map
/// * `stats` - Counters updated after every sweep
/// * `interval` - Entry TTL and sweep period
/// * `stop` - Stop signal receiver
///
/// # Example
/// ```ignore
/// let (stop_tx, stop_rx) = watch::channel(false);
/// let handle = spawn_reaper(store.clone(), stats.clone(), interval, stop_rx);
/// // Later, during shutdown:
/// let _ = stop_tx.send(true);
/// handle.await?;
/// ```
pub fn spawn_reaper(
    store: Arc<RwLock<CacheStore>>,
    stats: Arc<CacheStats>,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting cache reaper"
        );

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = stop.changed() => break,
                _ = ticker.tick() => {}
            }

            let (removed, remaining) = {
                let mut guard = store.write().await;
                let removed = guard.reap(Instant::now(), interval);
                (removed, guard.len())
            };
            stats.record_sweep(removed);

            if removed > 0 {
                info!(removed, remaining, "Reaper evicted expired entries");
            } else {
                debug!(remaining, "Reaper found no expired entries");
            }
        }

        info!("Cache reaper stopped");
    })
}
