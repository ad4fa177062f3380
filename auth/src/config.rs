//! OTP configuration.
//!
//! Configuration values are provided by the application, not hardcoded.

use crate::constants::DEFAULT_OTP_TTL_SECS;
use chrono::Duration;

/// One-time password configuration.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// How long an issued code stays valid.
    ///
    /// Default: 5 minutes
    pub ttl: Duration,

    /// How long a Redis-backed entry is retained after it expires, so that a
    /// late verification is reported as expired rather than missing.
    ///
    /// Default: 10 minutes
    pub expired_retention: Duration,
}

impl OtpConfig {
    /// Create the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ttl: Duration::seconds(DEFAULT_OTP_TTL_SECS),
            expired_retention: Duration::minutes(10),
        }
    }

    /// Set code time-to-live.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set post-expiry retention for networked stores.
    #[must_use]
    pub const fn with_expired_retention(mut self, retention: Duration) -> Self {
        self.expired_retention = retention;
        self
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_builder() {
        let config = OtpConfig::new()
            .with_ttl(Duration::minutes(2))
            .with_expired_retention(Duration::minutes(1));

        assert_eq!(config.ttl, Duration::minutes(2));
        assert_eq!(config.expired_retention, Duration::minutes(1));
    }

    #[test]
    fn test_default_config() {
        let config = OtpConfig::default();
        assert_eq!(config.ttl, Duration::minutes(5));
    }
}
