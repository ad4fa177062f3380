//! Cache refresh policy against a seeded cache file.

#![allow(clippy::unwrap_used)]

use chrono::Duration;
use eventgate_core::environment::Clock;
use eventgate_events::mocks::MockEventSource;
use eventgate_events::{
    CacheEnvelope, CacheSource, EventCache, EventCacheConfig, EventsError,
};
use eventgate_testing::{FixedClock, init_test_tracing, sample_event, sample_events, test_clock};
use std::path::{Path, PathBuf};

struct Fixture {
    _dir: tempfile::TempDir,
    path: PathBuf,
    clock: FixedClock,
    source: MockEventSource,
    cache: EventCache<MockEventSource, FixedClock>,
}

fn fixture(source: MockEventSource) -> Fixture {
    init_test_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("public").join("data.json");
    let clock = test_clock();
    let cache = EventCache::new(source.clone(), clock.clone(), EventCacheConfig::new(&path));
    Fixture {
        _dir: dir,
        path,
        clock,
        source,
        cache,
    }
}

/// Seed the cache file as if it had been fetched `age` ago.
fn seed(path: &Path, clock: &FixedClock, age: Duration, count: usize) -> String {
    let fetched_at = clock.now() - age;
    let envelope = CacheEnvelope::fetched(sample_events(count), fetched_at, Duration::hours(24))
        .unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let contents = serde_json::to_string_pretty(&envelope).unwrap();
    std::fs::write(path, &contents).unwrap();
    contents
}

#[tokio::test]
async fn test_recent_cache_is_served_without_fetching() {
    let f = fixture(MockEventSource::returning(vec![Ok(vec![sample_event("new")])]));
    seed(&f.path, &f.clock, Duration::minutes(4), 3);

    let read = f.cache.get().await;

    assert_eq!(read.source, CacheSource::Cached);
    assert_eq!(read.events, sample_events(3));
    assert!(read.error.is_none());
    assert_eq!(f.source.calls(), 0);
}

#[tokio::test]
async fn test_old_cache_is_refreshed() {
    let f = fixture(MockEventSource::returning(vec![Ok(vec![sample_event("new")])]));
    seed(&f.path, &f.clock, Duration::minutes(6), 3);

    let read = f.cache.get().await;

    assert_eq!(read.source, CacheSource::Fresh);
    assert_eq!(read.events, vec![sample_event("new")]);
    assert_eq!(f.source.calls(), 1);

    let written: CacheEnvelope =
        serde_json::from_str(&std::fs::read_to_string(&f.path).unwrap()).unwrap();
    assert_eq!(written.metadata.last_fetched, f.clock.now());
    assert_eq!(written.events, vec![sample_event("new")]);
}

#[tokio::test]
async fn test_failed_refresh_serves_stale_and_leaves_file_untouched() {
    let f = fixture(MockEventSource::returning(vec![Err(EventsError::UpstreamStatus(503))]));
    let before = seed(&f.path, &f.clock, Duration::minutes(6), 3);

    let read = f.cache.get().await;

    assert_eq!(read.source, CacheSource::Stale);
    assert_eq!(read.events, sample_events(3));
    assert_eq!(read.error.as_deref(), Some("Events API returned status 503"));
    assert_eq!(std::fs::read_to_string(&f.path).unwrap(), before);
}

#[tokio::test]
async fn test_empty_refresh_counts_as_failure() {
    let f = fixture(MockEventSource::returning(vec![Ok(Vec::new())]));
    let before = seed(&f.path, &f.clock, Duration::minutes(10), 2);

    let read = f.cache.get().await;

    assert_eq!(read.source, CacheSource::Stale);
    assert_eq!(read.events.len(), 2);
    assert!(read.error.is_some());
    assert_eq!(std::fs::read_to_string(&f.path).unwrap(), before);
}

#[tokio::test]
async fn test_window_restarts_after_refresh() {
    let f = fixture(MockEventSource::returning(vec![
        Ok(sample_events(2)),
        Ok(sample_events(4)),
    ]));

    assert_eq!(f.cache.get().await.source, CacheSource::Fresh);

    f.clock.advance(Duration::minutes(4));
    let read = f.cache.get().await;
    assert_eq!(read.source, CacheSource::Cached);
    assert_eq!(read.events.len(), 2);

    f.clock.advance(Duration::minutes(1));
    let read = f.cache.get().await;
    assert_eq!(read.source, CacheSource::Fresh);
    assert_eq!(read.events.len(), 4);
    assert_eq!(f.source.calls(), 2);
}

#[tokio::test]
async fn test_empty_cached_listing_is_refetched_inside_window() {
    let f = fixture(MockEventSource::returning(vec![Ok(sample_events(1))]));
    seed(&f.path, &f.clock, Duration::seconds(30), 0);

    let read = f.cache.get().await;

    assert_eq!(read.source, CacheSource::Fresh);
    assert_eq!(f.source.calls(), 1);
}
