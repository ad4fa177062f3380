//! Email provider trait.

use crate::error::Result;
use chrono::Duration;

/// Email provider.
///
/// This trait abstracts over the outbound mail transport (SMTP relay,
/// console logger, test double).
pub trait EmailProvider: Send + Sync {
    /// Send an HTML email.
    ///
    /// # Arguments
    ///
    /// - `to`: Recipient email address
    /// - `subject`: Subject line
    /// - `html_body`: HTML message body
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailDeliveryFailed`](crate::AuthError::EmailDeliveryFailed) if:
    /// - An address cannot be parsed
    /// - The transport rejects the message or cannot be reached
    ///
    /// Failures are reported to the caller and never retried here.
    fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Render the OTP email body.
#[must_use]
pub fn otp_email_body(code: &str, expires_in: Duration) -> String {
    let lifetime = describe_lifetime(expires_in);
    format!(
        r#"
<h2>Your OTP for Event Booking</h2>
<p>Use this OTP to complete your booking: <strong>{code}</strong></p>
<p>This OTP will expire in {lifetime}.</p>
"#
    )
}

/// Whole minutes, or seconds when under a minute.
fn describe_lifetime(lifetime: Duration) -> String {
    let (amount, unit) = if lifetime < Duration::minutes(1) {
        (lifetime.num_seconds(), "second")
    } else {
        (lifetime.num_minutes(), "minute")
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_email_body_contains_code() {
        let body = otp_email_body("482913", Duration::minutes(5));
        assert!(body.contains("<strong>482913</strong>"));
        assert!(body.contains("expire in 5 minutes"));
    }

    #[test]
    fn test_short_lifetime_is_shown_in_seconds() {
        assert!(otp_email_body("482913", Duration::seconds(30)).contains("expire in 30 seconds"));
        assert_eq!(describe_lifetime(Duration::seconds(1)), "1 second");
        assert_eq!(describe_lifetime(Duration::seconds(90)), "1 minute");
    }
}
