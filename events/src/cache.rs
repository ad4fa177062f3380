//! JSON file cache in front of an [`EventSource`].
//!
//! # Read policy
//!
//! ```text
//! get() ──▶ read envelope (missing/corrupt ⇒ empty)
//!             │
//!             ├─ events non-empty and age < refresh_interval ─▶ Cached
//!             │
//!             └─ otherwise fetch from source
//!                   ├─ non-empty ─▶ write envelope ─▶ Fresh
//!                   └─ error/empty ─▶ previous events + error ─▶ Stale
//! ```
//!
//! Each write goes to its own temporary file next to the target and is then
//! renamed over it, so a reader never sees a half-written envelope.
//! Concurrent refreshes are not coordinated; the last rename wins.

use crate::envelope::CacheEnvelope;
use crate::error::{EventsError, Result};
use crate::source::EventSource;
use chrono::Duration;
use eventgate_core::Event;
use eventgate_core::environment::Clock;
use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Metric name for cache reads, labelled by `source`.
pub const CACHE_READS_METRIC: &str = "eventgate_cache_reads_total";

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCacheConfig {
    /// Location of the envelope file.
    pub path: PathBuf,

    /// Minimum age before a refresh is attempted.
    pub refresh_interval: Duration,

    /// Offset written to `expiresAt`.
    pub ttl: Duration,
}

impl EventCacheConfig {
    /// Defaults (5 minute window, 24 hour expiry) at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            refresh_interval: Duration::minutes(5),
            ttl: Duration::hours(24),
        }
    }

    /// Set the refresh window.
    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the `expiresAt` offset.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for EventCacheConfig {
    fn default() -> Self {
        Self::new("public/data.json")
    }
}

/// Where the events in a [`CacheRead`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    /// Fetched from upstream during this read.
    Fresh,
    /// Served from the file within the refresh window.
    Cached,
    /// A refresh failed; previously cached events were served instead.
    Stale,
}

impl CacheSource {
    /// Lowercase label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Cached => "cached",
            Self::Stale => "stale",
        }
    }
}

/// Result of [`EventCache::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRead {
    /// Events to show.
    pub events: Vec<Event>,

    /// Provenance of `events`.
    pub source: CacheSource,

    /// Non-fatal error encountered while refreshing or persisting.
    pub error: Option<String>,
}

/// Event cache.
#[derive(Debug, Clone)]
pub struct EventCache<S, C> {
    source: S,
    clock: C,
    config: EventCacheConfig,
}

impl<S, C> EventCache<S, C>
where
    S: EventSource,
    C: Clock,
{
    /// Create a cache.
    #[must_use]
    pub const fn new(source: S, clock: C, config: EventCacheConfig) -> Self {
        Self {
            source,
            clock,
            config,
        }
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &EventCacheConfig {
        &self.config
    }

    /// Return the current listing, refreshing from upstream when due.
    ///
    /// Never fails: upstream and file errors are reported through
    /// [`CacheRead::error`].
    pub async fn get(&self) -> CacheRead {
        let envelope = self.load().await;
        let now = self.clock.now();

        let read = if envelope.needs_refresh(now, self.config.refresh_interval) {
            self.refresh(envelope).await
        } else {
            CacheRead {
                events: envelope.events,
                source: CacheSource::Cached,
                error: None,
            }
        };

        metrics::counter!(CACHE_READS_METRIC, "source" => read.source.as_str()).increment(1);
        read
    }

    async fn refresh(&self, previous: CacheEnvelope) -> CacheRead {
        let fetched = match self.source.fetch_events().await {
            Ok(events) if events.is_empty() => Err(EventsError::EmptyRefresh),
            other => other,
        };

        let events = match fetched {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    cached = previous.events.len(),
                    "Event refresh failed, serving cached events"
                );
                return CacheRead {
                    events: previous.events,
                    source: CacheSource::Stale,
                    error: Some(err.to_string()),
                };
            }
        };

        let now = self.clock.now();
        let envelope = match CacheEnvelope::fetched(events.clone(), now, self.config.ttl) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::error!(error = %err, ttl = %self.config.ttl, "Cannot stamp event cache");
                return CacheRead {
                    events,
                    source: CacheSource::Fresh,
                    error: Some(err.to_string()),
                };
            }
        };
        let error = match self.store(&envelope).await {
            Ok(()) => {
                tracing::info!(
                    count = envelope.events.len(),
                    path = %self.config.path.display(),
                    "Event cache refreshed"
                );
                None
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    path = %self.config.path.display(),
                    "Failed to write event cache"
                );
                Some(err.to_string())
            }
        };

        CacheRead {
            events: envelope.events,
            source: CacheSource::Fresh,
            error,
        }
    }

    /// Read the envelope, treating a missing or corrupt file as empty.
    async fn load(&self) -> CacheEnvelope {
        let path = &self.config.path;
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Corrupt event cache, ignoring"
                );
                CacheEnvelope::empty()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => CacheEnvelope::empty(),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Unreadable event cache, ignoring"
                );
                CacheEnvelope::empty()
            }
        }
    }

    async fn store(&self, envelope: &CacheEnvelope) -> Result<()> {
        write_atomic(&self.config.path, serde_json::to_vec_pretty(envelope)?).await
    }
}

async fn write_atomic(path: &Path, contents: Vec<u8>) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            tokio::fs::create_dir_all(parent).await?;
            parent.to_path_buf()
        }
        None => PathBuf::from("."),
    };
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|err| err.error)?;
        Ok(())
    })
    .await
    .map_err(|err| EventsError::CacheIo(format!("Cache writer task failed: {err}")))?
}
