//! OTP constants.

/// Smallest code that can be issued (six digits, no leading zero).
pub const OTP_CODE_MIN: u32 = 100_000;

/// Largest code that can be issued.
pub const OTP_CODE_MAX: u32 = 999_999;

/// Default code lifetime in seconds.
pub const DEFAULT_OTP_TTL_SECS: i64 = 5 * 60;

/// Subject line of the OTP email.
pub const OTP_EMAIL_SUBJECT: &str = "Your Event Booking OTP";

/// Redis key namespace for OTP entries.
pub const OTP_KEY_PREFIX: &str = "eventgate:otp:";

/// Metric names.
pub mod metrics {
    /// Codes issued.
    pub const OTP_ISSUED: &str = "eventgate_otp_issued_total";

    /// Verification attempts, labelled by `outcome`.
    pub const OTP_VERIFICATIONS: &str = "eventgate_otp_verifications_total";

    /// Outbound emails, labelled by `status`.
    pub const EMAILS_SENT: &str = "eventgate_emails_sent_total";
}
