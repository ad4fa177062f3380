//! Error types for event fetching and caching.

use thiserror::Error;

/// Result type alias for event operations.
pub type Result<T> = std::result::Result<T, EventsError>;

/// Errors raised while fetching or persisting events.
///
/// None of these are fatal: [`EventCache`](crate::EventCache) folds them into
/// the `error` field of its read result and keeps serving what it has.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventsError {
    // ═══════════════════════════════════════════════════════════
    // Upstream Errors
    // ═══════════════════════════════════════════════════════════

    /// The upstream API could not be reached.
    #[error("Events API unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream API answered with a non-success status.
    #[error("Events API returned status {0}")]
    UpstreamStatus(u16),

    /// The upstream body was not the expected JSON:API document.
    #[error("Malformed events response: {0}")]
    MalformedResponse(String),

    /// A refresh produced no events.
    #[error("Refresh returned no events")]
    EmptyRefresh,

    /// The configured cache expiry overflows the clock.
    #[error("Cache TTL is out of range")]
    TtlOutOfRange,

    // ═══════════════════════════════════════════════════════════
    // Cache File Errors
    // ═══════════════════════════════════════════════════════════

    /// Reading or writing the cache file failed.
    #[error("Cache I/O error: {0}")]
    CacheIo(String),

    /// The cache envelope could not be encoded.
    #[error("Cache serialization error: {0}")]
    CacheSerialization(String),
}

impl From<std::io::Error> for EventsError {
    fn from(err: std::io::Error) -> Self {
        Self::CacheIo(err.to_string())
    }
}

impl From<serde_json::Error> for EventsError {
    fn from(err: serde_json::Error) -> Self {
        Self::CacheSerialization(err.to_string())
    }
}
