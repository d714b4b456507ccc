//! Integration Tests for the cache-fronted fetcher
//!
//! Exercises the response cache, its sweep task and the fetcher together
//! through the public API.

mod common;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use common::MockUpstream;
use pokedex_cache::{FetchError, Fetcher, RefreshPolicy, ResponseCache};
use tokio::time::sleep;

// == Helper Functions ==

fn fetcher(cache: Arc<ResponseCache>, upstream: Arc<MockUpstream>) -> Fetcher {
    Fetcher::new(cache, upstream)
}

// == Expiry Scenarios ==

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl_and_sweep() {
    let (cache, sweeper) =
        ResponseCache::new(Duration::from_millis(100)).spawn(Duration::from_millis(50));

    cache.add("a", Bytes::from_static(b"x")).await;

    sleep(Duration::from_millis(30)).await;
    assert_eq!(cache.get("a").await, Some(Bytes::from_static(b"x")));

    sleep(Duration::from_millis(130)).await;
    assert_eq!(cache.get("a").await, None);

    sweeper.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stale_entry_served_until_swept() {
    let (cache, sweeper) =
        ResponseCache::new(Duration::from_millis(100)).spawn(Duration::from_millis(1000));
    let upstream = Arc::new(MockUpstream::new().with_body("area-1", "{}"));
    let fetcher = fetcher(cache.clone(), upstream.clone());

    fetcher.fetch("area-1").await.unwrap();
    sleep(Duration::from_millis(500)).await;

    // Past the TTL but before the first sweep tick
    fetcher.fetch("area-1").await.unwrap();
    assert_eq!(upstream.calls(), 1);

    sleep(Duration::from_millis(600)).await;
    fetcher.fetch("area-1").await.unwrap();
    assert_eq!(upstream.calls(), 2);

    sweeper.stop().await;
}

// == Fetch Scenarios ==

#[tokio::test]
async fn test_miss_then_hit() {
    let cache = Arc::new(ResponseCache::new(Duration::from_secs(5)));
    let upstream = Arc::new(MockUpstream::new().with_body("area-1", r#"{"name":"area-1"}"#));
    let fetcher = fetcher(cache.clone(), upstream.clone());

    let first = fetcher.fetch("area-1").await.unwrap();
    assert_eq!(upstream.calls_for("area-1"), 1);
    assert_eq!(cache.get("area-1").await, Some(first.clone()));

    let second = fetcher.fetch("area-1").await.unwrap();
    assert_eq!(upstream.calls_for("area-1"), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_error_kinds_are_distinct_and_uncached() {
    let cache = Arc::new(ResponseCache::new(Duration::from_secs(5)));
    let upstream = Arc::new(
        MockUpstream::new()
            .with_error("flaky", FetchError::Transport("timed out".to_string()))
            .with_body("garbage", "not json"),
    );
    let fetcher = fetcher(cache.clone(), upstream.clone());

    assert!(matches!(
        fetcher.fetch("missing").await,
        Err(FetchError::NotFound(_))
    ));
    assert!(matches!(
        fetcher.fetch("flaky").await,
        Err(FetchError::Transport(_))
    ));
    assert!(matches!(
        fetcher.fetch_json::<serde_json::Value>("garbage").await,
        Err(FetchError::MalformedPayload(_))
    ));

    assert_eq!(cache.get("missing").await, None);
    assert_eq!(cache.get("flaky").await, None);
}

#[tokio::test]
async fn test_touch_only_policy_keeps_first_payload_through_fetcher() {
    let cache = Arc::new(
        ResponseCache::new(Duration::from_secs(5)).with_refresh_policy(RefreshPolicy::TouchOnly),
    );
    cache.add("k", Bytes::from_static(b"first")).await;
    cache.add("k", Bytes::from_static(b"second")).await;

    let upstream = Arc::new(MockUpstream::new());
    let body = fetcher(cache, upstream.clone()).fetch("k").await.unwrap();

    assert_eq!(body, Bytes::from_static(b"first"));
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_are_not_coalesced() {
    let cache = Arc::new(ResponseCache::new(Duration::from_secs(5)));
    let upstream = Arc::new(MockUpstream::new().with_body("shared", "{}"));
    let fetcher = fetcher(cache.clone(), upstream.clone());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let fetcher = fetcher.clone();
            tokio::spawn(async move { fetcher.fetch("shared").await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }

    // Somewhere between one and eight upstream calls, one cache entry
    let calls = upstream.calls();
    assert!((1..=8).contains(&calls));
    assert_eq!(cache.len().await, 1);
}

// == Concurrency Stress ==

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_add_get_keeps_store_consistent() {
    const WRITERS: usize = 16;
    const KEYS_PER_WRITER: usize = 200;

    let (cache, sweeper) = ResponseCache::new(Duration::from_secs(60)).spawn(Duration::from_millis(1));

    let mut tasks = Vec::new();
    for writer in 0..WRITERS {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..KEYS_PER_WRITER {
                // Distinct keys per writer plus a small shared key space
                cache
                    .add(format!("w{}-k{}", writer, i), Bytes::from(format!("{}", i)))
                    .await;
                cache
                    .add(format!("shared-{}", i % 10), Bytes::from(format!("{}", writer)))
                    .await;
                let _ = cache.get(&format!("w{}-k{}", (writer + 1) % WRITERS, i)).await;
                tokio::task::yield_now().await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(cache.len().await, WRITERS * KEYS_PER_WRITER + 10);
    for writer in 0..WRITERS {
        for i in 0..KEYS_PER_WRITER {
            let got = cache.get(&format!("w{}-k{}", writer, i)).await;
            assert_eq!(got, Some(Bytes::from(format!("{}", i))));
        }
    }
    for shared in 0..10 {
        let got = cache.get(&format!("shared-{}", shared)).await.unwrap();
        let writer: usize = std::str::from_utf8(&got).unwrap().parse().unwrap();
        assert!(writer < WRITERS);
    }

    sweeper.stop().await;
}
