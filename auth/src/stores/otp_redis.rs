//! Redis-based OTP store implementation.
//!
//! # Architecture
//!
//! Entries are stored in Redis with:
//! - **Key**: `eventgate:otp:{email}` → JSON-serialized `OtpEntry`
//! - **TTL**: remaining code lifetime plus a retention grace
//!
//! The grace keeps an expired entry visible for a while so the registry can
//! report `OtpExpired` (and delete it) instead of `OtpNotFound`. Redis
//! eventually cleans up entries nobody verifies.
//!
//! # Example
//!
//! ```no_run
//! use eventgate_auth::stores::RedisOtpStore;
//! use chrono::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RedisOtpStore::new("redis://127.0.0.1:6379", Duration::minutes(10)).await?;
//! # Ok(())
//! # }
//! ```

use crate::constants::OTP_KEY_PREFIX;
use crate::error::{AuthError, Result};
use crate::providers::{OtpEntry, OtpStore};
use chrono::Duration;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

/// `Redis`-based OTP store.
///
/// This type is `Clone`; clones share the same `ConnectionManager`.
#[derive(Clone)]
pub struct RedisOtpStore {
    /// Connection manager for connection pooling.
    conn_manager: ConnectionManager,

    /// How long an entry outlives its expiry.
    expired_retention: Duration,
}

impl RedisOtpStore {
    /// Create a new `Redis` OTP store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreUnavailable`] if the URL is malformed or the
    /// connection fails.
    pub async fn new(redis_url: &str, expired_retention: Duration) -> Result<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            AuthError::StoreUnavailable(format!("Failed to create Redis client: {e}"))
        })?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            AuthError::StoreUnavailable(format!("Failed to create Redis connection manager: {e}"))
        })?;

        tracing::info!("RedisOtpStore initialized successfully");

        Ok(Self {
            conn_manager,
            expired_retention,
        })
    }

    /// `eventgate:otp:{email}`
    fn otp_key(email: &str) -> String {
        format!("{OTP_KEY_PREFIX}{email}")
    }

    /// Seconds to keep `entry` in Redis, never less than one.
    ///
    /// Measured from `issued_at`, so the key lifetime follows the registry's
    /// clock rather than the wall clock of this process.
    fn ttl_seconds(entry: &OtpEntry, expired_retention: Duration) -> u64 {
        let lifetime = entry.expires_at.signed_duration_since(entry.issued_at);
        lifetime
            .checked_add(&expired_retention)
            .map_or(u64::MAX, |ttl| u64::try_from(ttl.num_seconds()).unwrap_or(0))
            .max(1)
    }
}

impl OtpStore for RedisOtpStore {
    async fn put(&self, email: &str, entry: OtpEntry) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = Self::otp_key(email);
        let ttl_seconds = Self::ttl_seconds(&entry, self.expired_retention);

        let bytes = serde_json::to_vec(&entry)
            .map_err(|e| AuthError::SerializationError(e.to_string()))?;

        let _: () = conn
            .set_ex(&key, bytes, ttl_seconds)
            .await
            .map_err(|e| AuthError::StoreUnavailable(format!("Failed to store OTP: {e}")))?;

        tracing::debug!(ttl_seconds, expires_at = %entry.expires_at, "Stored OTP in Redis");
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpEntry>> {
        let mut conn = self.conn_manager.clone();
        let key = Self::otp_key(email);

        let bytes: Option<Vec<u8>> = conn
            .get(&key)
            .await
            .map_err(|e| AuthError::StoreUnavailable(format!("Failed to read OTP: {e}")))?;

        bytes
            .map(|bytes| {
                serde_json::from_slice(&bytes)
                    .map_err(|e| AuthError::SerializationError(e.to_string()))
            })
            .transpose()
    }

    async fn remove(&self, email: &str) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = Self::otp_key(email);

        let deleted: i32 = conn
            .del(&key)
            .await
            .map_err(|e| AuthError::StoreUnavailable(format!("Failed to delete OTP: {e}")))?;

        tracing::trace!(deleted, "Removed OTP from Redis");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use eventgate_core::environment::Clock;

    #[test]
    fn test_key_format() {
        assert_eq!(RedisOtpStore::otp_key("a@x.com"), "eventgate:otp:a@x.com");
    }

    #[test]
    fn test_key_ttl_follows_entry_lifetime() {
        // Issued long before the wall clock; the key still lives lifetime + retention.
        let issued_at = eventgate_testing::test_clock().now();
        let entry = OtpEntry::new("123456".into(), issued_at, issued_at + Duration::minutes(5));

        assert_eq!(RedisOtpStore::ttl_seconds(&entry, Duration::minutes(10)), 900);
        assert_eq!(RedisOtpStore::ttl_seconds(&entry, Duration::zero()), 300);
    }

    #[test]
    fn test_key_ttl_is_at_least_one_second() {
        let issued_at = eventgate_testing::test_clock().now();
        let entry = OtpEntry::new("123456".into(), issued_at, issued_at);

        assert_eq!(RedisOtpStore::ttl_seconds(&entry, Duration::zero()), 1);
    }

    #[tokio::test]
    #[ignore] // Requires Redis running at localhost:6379
    async fn test_redis_otp_lifecycle() {
        let store = RedisOtpStore::new("redis://127.0.0.1:6379", Duration::minutes(10))
            .await
            .unwrap();

        let now = chrono::Utc::now();
        let entry = OtpEntry::new("654321".to_string(), now, now + Duration::minutes(5));

        store.put("redis-test@example.com", entry.clone()).await.unwrap();
        assert_eq!(store.get("redis-test@example.com").await.unwrap(), Some(entry));

        store.remove("redis-test@example.com").await.unwrap();
        assert!(store.get("redis-test@example.com").await.unwrap().is_none());
    }
}
