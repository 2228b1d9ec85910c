//! Integration Tests for ExpiringCache
//!
//! Exercises the public cache contract: round-trips, overwrites, expiry by the
//! reaper, and concurrent access while the reaper sweeps.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reapcache::{CacheError, ExpiringCache};
use tokio::time;

// == Basic Contract ==

#[tokio::test]
async fn test_roundtrip() {
    let cache = ExpiringCache::new(Duration::from_secs(60)).unwrap();

    cache.put("k", vec![9u8, 8, 7]).await;

    assert_eq!(cache.get("k").await, Some(vec![9, 8, 7]));
}

#[tokio::test]
async fn test_miss_on_unknown_key() {
    let cache = ExpiringCache::new(Duration::from_secs(60)).unwrap();

    cache.put("known", b"v".to_vec()).await;

    assert_eq!(cache.get("unknown").await, None);
}

#[tokio::test]
async fn test_overwrite_returns_latest() {
    let cache = ExpiringCache::new(Duration::from_secs(60)).unwrap();

    cache.put("k", b"v1".to_vec()).await;
    cache.put("k", b"v2".to_vec()).await;

    assert_eq!(cache.get("k").await, Some(b"v2".to_vec()));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_zero_interval_is_rejected() {
    assert!(matches!(
        ExpiringCache::new(Duration::ZERO),
        Err(CacheError::InvalidInterval)
    ));
}

// == Expiry ==

// interval = 50ms; put("X", [1,2,3]); hit; sleep 120ms; miss
#[tokio::test(start_paused = true)]
async fn test_scenario_expires_after_sweep() {
    let cache = ExpiringCache::new(Duration::from_millis(50)).unwrap();

    cache.put("X", [1u8, 2, 3]).await;
    assert_eq!(cache.get("X").await, Some(vec![1, 2, 3]));

    time::sleep(Duration::from_millis(120)).await;
    assert_eq!(cache.get("X").await, None);
}

#[tokio::test(start_paused = true)]
async fn test_expiry_half_interval_then_two_intervals() {
    let interval = Duration::from_millis(200);
    let cache = ExpiringCache::new(interval).unwrap();

    cache.put("k", b"v".to_vec()).await;

    time::sleep(interval / 2).await;
    assert_eq!(cache.get("k").await, Some(b"v".to_vec()));

    time::sleep(interval * 3 / 2 + Duration::from_millis(1)).await;
    assert_eq!(cache.get("k").await, None);
}

#[tokio::test(start_paused = true)]
async fn test_independent_keys() {
    let interval = Duration::from_millis(100);
    let cache = ExpiringCache::new(interval).unwrap();

    cache.put("a", b"old".to_vec()).await;
    time::sleep(Duration::from_millis(40)).await;
    cache.put("b", b"new".to_vec()).await;

    // Sweep at 100ms removes "a" (age 100ms) but keeps "b" (age 60ms)
    time::sleep(Duration::from_millis(70)).await;
    assert_eq!(cache.get("a").await, None);
    assert_eq!(cache.get("b").await, Some(b"new".to_vec()));

    // Sweep at 200ms removes "b"
    time::sleep(Duration::from_millis(100)).await;
    assert_eq!(cache.get("b").await, None);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_writes_never_expire_early() {
    let interval = Duration::from_millis(100);
    let cache = ExpiringCache::new(interval).unwrap();

    // Rewrite every 30ms across several sweeps
    for i in 0..10u8 {
        cache.put("hot", vec![i]).await;
        time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("hot").await, Some(vec![i]));
    }
}

// == Lifecycle ==

#[tokio::test(start_paused = true)]
async fn test_shutdown_is_deterministic() {
    let cache = ExpiringCache::new(Duration::from_millis(50)).unwrap();
    cache.put("k", b"v".to_vec()).await;

    cache.shutdown().await;
    assert!(!cache.reaper_running());

    time::sleep(Duration::from_millis(500)).await;
    assert_eq!(cache.get("k").await, Some(b"v".to_vec()));
}

#[tokio::test]
async fn test_get_or_fetch_avoids_second_fetch() {
    let cache = ExpiringCache::new(Duration::from_secs(60)).unwrap();
    let counter = AtomicUsize::new(0);
    let fetches = &counter;

    let fetch = move || async move {
        fetches.fetch_add(1, Ordering::SeqCst);
        Ok::<_, std::io::Error>(b"{\"results\":[]}".to_vec())
    };

    let first = cache
        .get_or_fetch("https://api.example/v2/area", fetch)
        .await
        .unwrap();
    let second = cache
        .get_or_fetch("https://api.example/v2/area", fetch)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let stats = cache.stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

// == Concurrency ==

const WRITERS: usize = 8;
const READERS: usize = 4;
const PUTS_PER_WRITER: usize = 1000;

fn key_for(writer: usize, i: usize) -> String {
    format!("w{}-{}", writer, i)
}

fn value_for(writer: usize, i: usize) -> Vec<u8> {
    format!("{}:{}", writer, i).into_bytes()
}

async fn run_concurrent_load(cache: Arc<ExpiringCache>) {
    let mut handles = Vec::new();

    for writer in 0..WRITERS {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..PUTS_PER_WRITER {
                // Each key is written twice; the second write is the final value
                cache.put(key_for(writer, i), b"draft".to_vec()).await;
                cache.put(key_for(writer, i), value_for(writer, i)).await;
            }
        }));
    }

    for reader in 0..READERS {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..PUTS_PER_WRITER {
                let writer = (reader + i) % WRITERS;
                if let Some(value) = cache.get(&key_for(writer, i)).await {
                    assert!(
                        value == b"draft" || value == value_for(writer, i),
                        "torn or foreign value for {}",
                        key_for(writer, i)
                    );
                }
            }
        }));
    }

    for handle in handles {
        handle.await.expect("task should not panic");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_readers_and_reaper() {
    // Short interval so the reaper sweeps while the load runs
    let cache = Arc::new(ExpiringCache::new(Duration::from_millis(5)).unwrap());

    time::timeout(Duration::from_secs(30), run_concurrent_load(cache.clone()))
        .await
        .expect("concurrent load should not deadlock");

    // Every key is either evicted or holds its last write
    for writer in 0..WRITERS {
        for i in 0..PUTS_PER_WRITER {
            if let Some(value) = cache.get(&key_for(writer, i)).await {
                assert_eq!(value, value_for(writer, i));
            }
        }
    }

    assert!(cache.reaper_running());
    cache.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_final_values_without_expiry() {
    let cache = Arc::new(ExpiringCache::new(Duration::from_secs(3600)).unwrap());

    time::timeout(Duration::from_secs(30), run_concurrent_load(cache.clone()))
        .await
        .expect("concurrent load should not deadlock");

    assert_eq!(cache.len().await, WRITERS * PUTS_PER_WRITER);
    for writer in 0..WRITERS {
        for i in 0..PUTS_PER_WRITER {
            assert_eq!(
                cache.get(&key_for(writer, i)).await,
                Some(value_for(writer, i))
            );
        }
    }

    cache.shutdown().await;
}
