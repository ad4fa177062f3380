//! Error types for OTP issuance, verification and delivery.

use thiserror::Error;

/// Result type alias for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Error taxonomy for the OTP flow.
///
/// Verification failures are user-actionable and map to 400-class responses;
/// delivery and storage failures are 500-class. None of them are fatal to the
/// process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Verification Errors
    // ═══════════════════════════════════════════════════════════

    /// No outstanding code for this email (never issued, consumed, or expired).
    #[error("No OTP found for this email")]
    OtpNotFound,

    /// The code's lifetime elapsed before it was submitted.
    #[error("OTP has expired")]
    OtpExpired,

    /// The submitted code does not match the stored one.
    #[error("Invalid OTP")]
    OtpMismatch,

    /// The address is not shaped like `local@domain`.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Email delivery failed.
    #[error("Failed to send email: {0}")]
    EmailDeliveryFailed(String),

    /// The OTP store backend could not be reached.
    #[error("OTP store unavailable: {0}")]
    StoreUnavailable(String),

    /// The configured code lifetime overflows the clock.
    #[error("OTP lifetime is out of range")]
    TtlOutOfRange,

    /// A stored entry could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ═══════════════════════════════════════════════════════════
    // Booking Gate
    // ═══════════════════════════════════════════════════════════

    /// The gate received input that its current state does not accept.
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        /// Attempted action.
        action: &'static str,
        /// State the gate was in.
        state: &'static str,
    },

    /// A remote OTP endpoint returned an error or could not be reached.
    #[error("OTP request failed: {0}")]
    ChallengeRequestFailed(String),
}

impl AuthError {
    /// Returns `true` if this error is caused by the caller's input and the
    /// user can act on it (retry, re-request a code, fix the address).
    ///
    /// # Examples
    ///
    /// ```
    /// # use eventgate_auth::AuthError;
    /// assert!(AuthError::OtpMismatch.is_user_error());
    /// assert!(!AuthError::EmailDeliveryFailed("timeout".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::OtpNotFound | Self::OtpExpired | Self::OtpMismatch | Self::InvalidEmail(_)
        )
    }

    /// Short label used for logs and metric labels.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OtpNotFound => "not_found",
            Self::OtpExpired => "expired",
            Self::OtpMismatch => "mismatch",
            Self::InvalidEmail(_) => "invalid_email",
            Self::EmailDeliveryFailed(_) => "delivery_failed",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::TtlOutOfRange => "ttl_out_of_range",
            Self::SerializationError(_) => "serialization",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::ChallengeRequestFailed(_) => "challenge_failed",
        }
    }
}
