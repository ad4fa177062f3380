//! OTP registry.
//!
//! Issues six-digit codes keyed by email address and verifies them exactly
//! once.
//!
//! # Lifecycle
//!
//! ```text
//! issue(email) ──▶ entry { code, expires_at = now + ttl }
//!                     │
//!   verify(email, c) ─┼─ no entry ─────────▶ OtpNotFound
//!                     ├─ now > expires_at ─▶ OtpExpired   (entry deleted)
//!                     ├─ c != code ────────▶ OtpMismatch  (entry kept)
//!                     └─ c == code ────────▶ Ok           (entry deleted)
//! ```
//!
//! A second `issue` for the same email overwrites the first entry.

use crate::config::OtpConfig;
use crate::constants::{OTP_CODE_MAX, OTP_CODE_MIN, metrics as metric_names};
use crate::error::{AuthError, Result};
use crate::providers::{OtpEntry, OtpStore};
use chrono::{DateTime, Duration, Utc};
use eventgate_core::environment::Clock;
use rand::Rng;

/// A freshly issued code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedOtp {
    /// The six-digit code to deliver.
    pub code: String,

    /// When the code stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// OTP registry over an injectable store and clock.
#[derive(Debug, Clone)]
pub struct OtpRegistry<S, C> {
    store: S,
    clock: C,
    ttl: Duration,
}

impl<S, C> OtpRegistry<S, C>
where
    S: OtpStore,
    C: Clock,
{
    /// Create a registry.
    #[must_use]
    pub const fn new(store: S, clock: C, config: &OtpConfig) -> Self {
        Self {
            store,
            clock,
            ttl: config.ttl,
        }
    }

    /// Code lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Generate a uniformly random code in `100000..=999999`.
    #[must_use]
    pub fn generate_code() -> String {
        rand::thread_rng()
            .gen_range(OTP_CODE_MIN..=OTP_CODE_MAX)
            .to_string()
    }

    /// Issue a code for `email`, replacing any outstanding one.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TtlOutOfRange`]: `now + ttl` is not a representable instant
    /// - [`AuthError::StoreUnavailable`]: a networked store backend failed
    pub async fn issue(&self, email: &str) -> Result<IssuedOtp> {
        let code = Self::generate_code();
        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::TtlOutOfRange)?;

        self.store
            .put(email, OtpEntry::new(code.clone(), issued_at, expires_at))
            .await?;

        metrics::counter!(metric_names::OTP_ISSUED).increment(1);
        tracing::debug!(email = %email, expires_at = %expires_at, "OTP issued");

        Ok(IssuedOtp { code, expires_at })
    }

    /// Verify `submitted` against the outstanding code for `email`.
    ///
    /// Success consumes the code. An expired entry is deleted when detected;
    /// a mismatching code leaves the entry in place so the user can retry.
    ///
    /// # Errors
    ///
    /// - [`AuthError::OtpNotFound`]: nothing outstanding for `email`
    /// - [`AuthError::OtpExpired`]: the code outlived its TTL
    /// - [`AuthError::OtpMismatch`]: wrong code
    /// - [`AuthError::StoreUnavailable`]: store backend failure
    pub async fn verify(&self, email: &str, submitted: &str) -> Result<()> {
        let outcome = self.check(email, submitted.trim()).await;

        let label = match &outcome {
            Ok(()) => "success",
            Err(err) => err.kind(),
        };
        metrics::counter!(metric_names::OTP_VERIFICATIONS, "outcome" => label).increment(1);

        match &outcome {
            Ok(()) => tracing::info!(email = %email, "OTP verified"),
            Err(err) => {
                tracing::warn!(email = %email, reason = label, error = %err, "OTP rejected");
            }
        }

        outcome
    }

    async fn check(&self, email: &str, submitted: &str) -> Result<()> {
        let Some(entry) = self.store.get(email).await? else {
            return Err(AuthError::OtpNotFound);
        };

        if entry.is_expired_at(self.clock.now()) {
            self.store.remove(email).await?;
            return Err(AuthError::OtpExpired);
        }

        if !constant_time_eq::constant_time_eq(submitted.as_bytes(), entry.code.as_bytes()) {
            return Err(AuthError::OtpMismatch);
        }

        self.store.remove(email).await
    }
}
