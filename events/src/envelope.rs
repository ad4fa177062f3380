//! Persisted cache envelope.
//!
//! ```json
//! {
//!   "metadata": { "lastFetched": "2025-01-01T00:00:00Z", "expiresAt": "2025-01-02T00:00:00Z" },
//!   "events": [ ... ]
//! }
//! ```

use crate::error::{EventsError, Result};
use chrono::{DateTime, Duration, Utc};
use eventgate_core::Event;
use serde::{Deserialize, Serialize};

/// Fetch metadata stored alongside the events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMetadata {
    /// When the events were last fetched from upstream.
    pub last_fetched: DateTime<Utc>,

    /// Informational expiry; refresh decisions use `last_fetched` only.
    pub expires_at: DateTime<Utc>,
}

/// Metadata plus the ordered event listing.
///
/// An envelope with no events always triggers a refresh on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    /// Fetch metadata.
    pub metadata: CacheMetadata,

    /// Events in upstream order (ascending start time).
    #[serde(default)]
    pub events: Vec<Event>,
}

impl CacheEnvelope {
    /// The envelope used when no cache file exists or it cannot be read.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            metadata: CacheMetadata {
                last_fetched: DateTime::<Utc>::UNIX_EPOCH,
                expires_at: DateTime::<Utc>::UNIX_EPOCH,
            },
            events: Vec::new(),
        }
    }

    /// Wrap freshly fetched events.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::TtlOutOfRange`] if `now + ttl` overflows.
    pub fn fetched(events: Vec<Event>, now: DateTime<Utc>, ttl: Duration) -> Result<Self> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(EventsError::TtlOutOfRange)?;
        Ok(Self {
            metadata: CacheMetadata {
                last_fetched: now,
                expires_at,
            },
            events,
        })
    }

    /// Time elapsed since the last fetch.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.metadata.last_fetched
    }

    /// Whether a read at `now` should try to refresh.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>, refresh_interval: Duration) -> bool {
        self.events.is_empty() || self.age(now) >= refresh_interval
    }
}

impl Default for CacheEnvelope {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use eventgate_core::environment::Clock;
    use eventgate_testing::{sample_events, test_clock};

    #[test]
    fn test_wire_format_uses_camel_case_metadata() {
        let now = test_clock().now();
        let envelope = CacheEnvelope::fetched(sample_events(1), now, Duration::hours(24)).unwrap();

        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["metadata"]["lastFetched"], "2025-01-01T00:00:00Z");
        assert_eq!(json["metadata"]["expiresAt"], "2025-01-02T00:00:00Z");
        assert_eq!(json["events"][0]["eventUrl"], "https://tickets.example.com/1");
    }

    #[test]
    fn test_empty_envelope_always_needs_refresh() {
        let now = test_clock().now();
        let mut envelope = CacheEnvelope::empty();
        envelope.metadata.last_fetched = now;

        assert!(envelope.needs_refresh(now, Duration::minutes(5)));
    }

    #[test]
    fn test_refresh_window_boundary() {
        let now = test_clock().now();
        let envelope = CacheEnvelope::fetched(sample_events(2), now, Duration::hours(24)).unwrap();

        assert!(!envelope.needs_refresh(now + Duration::seconds(299), Duration::minutes(5)));
        assert!(envelope.needs_refresh(now + Duration::minutes(5), Duration::minutes(5)));
    }

    #[test]
    fn test_overflowing_ttl_is_an_error() {
        let now = test_clock().now();

        let result = CacheEnvelope::fetched(sample_events(1), now, Duration::MAX);

        assert_eq!(result, Err(EventsError::TtlOutOfRange));
    }
}
