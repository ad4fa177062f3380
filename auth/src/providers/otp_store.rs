//! OTP store trait.
//!
//! The registry keeps its codes behind this key-value abstraction so the
//! in-process map can be swapped for a networked store without changing the
//! registry's contract.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One outstanding code for an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpEntry {
    /// Six-digit decimal code.
    pub code: String,

    /// Instant after which the code is rejected.
    pub expires_at: DateTime<Utc>,

    /// Instant the code was issued.
    pub issued_at: DateTime<Utc>,
}

impl OtpEntry {
    /// Create a new entry.
    #[must_use]
    pub const fn new(code: String, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            code,
            expires_at,
            issued_at,
        }
    }

    /// Whether the entry is past its expiry at `now`.
    ///
    /// The expiry instant itself is still valid; only strictly later instants
    /// are expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// OTP store.
///
/// Keyed by normalized email address, one entry per key, last write wins.
///
/// # Implementation Notes
///
/// - `put` overwrites any previous entry for the same email
/// - `get` must return expired entries as-is; expiry is the registry's call
/// - No lock is held across a `get`/`remove` pair; concurrent requests for the
///   same email race with last-write-wins semantics
pub trait OtpStore: Send + Sync {
    /// Store `entry` under `email`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend fails.
    fn put(
        &self,
        email: &str,
        entry: OtpEntry,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Look up the entry for `email`.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend fails.
    fn get(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<OtpEntry>>> + Send;

    /// Remove the entry for `email` (no-op if absent).
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend fails.
    fn remove(&self, email: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let issued = Utc::now();
        let entry = OtpEntry::new("123456".into(), issued, issued + Duration::minutes(5));

        assert!(!entry.is_expired_at(issued + Duration::minutes(5)));
        assert!(entry.is_expired_at(issued + Duration::minutes(5) + Duration::milliseconds(1)));
    }
}
