//! OTP service: the registry paired with a notification sender.

use crate::constants::{OTP_EMAIL_SUBJECT, metrics as metric_names};
use crate::error::Result;
use crate::providers::{EmailProvider, OtpChallenge, OtpStore, otp_email_body};
use crate::registry::OtpRegistry;
use crate::utils::normalize_email;
use eventgate_core::environment::Clock;

/// Issues codes, emails them, and verifies submissions.
///
/// Email addresses are normalized before they reach the registry, so the
/// same inbox always maps to one entry.
#[derive(Debug, Clone)]
pub struct OtpService<S, E, C> {
    registry: OtpRegistry<S, C>,
    email: E,
}

impl<S, E, C> OtpService<S, E, C>
where
    S: OtpStore,
    E: EmailProvider,
    C: Clock,
{
    /// Create a service.
    #[must_use]
    pub const fn new(registry: OtpRegistry<S, C>, email: E) -> Self {
        Self { registry, email }
    }

    /// The underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &OtpRegistry<S, C> {
        &self.registry
    }

    /// The notification sender.
    #[must_use]
    pub const fn email_provider(&self) -> &E {
        &self.email
    }

    /// Issue a code for `email` and deliver it.
    ///
    /// If delivery fails the issued entry stays in the store; a retry issues
    /// a new code that overwrites it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidEmail`](crate::AuthError::InvalidEmail): malformed address
    /// - [`AuthError::EmailDeliveryFailed`](crate::AuthError::EmailDeliveryFailed): the mailer refused
    /// - [`AuthError::StoreUnavailable`](crate::AuthError::StoreUnavailable): store backend failure
    pub async fn request_otp(&self, email: &str) -> Result<()> {
        let email = normalize_email(email)?;
        let issued = self.registry.issue(&email).await?;

        let body = otp_email_body(&issued.code, self.registry.ttl());
        self.send_email(&email, OTP_EMAIL_SUBJECT, &body).await
    }

    /// Verify a submitted code.
    ///
    /// # Errors
    ///
    /// See [`OtpRegistry::verify`]; additionally `InvalidEmail` for a
    /// malformed address.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<()> {
        let email = normalize_email(email)?;
        self.registry.verify(&email, code).await
    }

    /// Send an arbitrary HTML email through the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailDeliveryFailed`](crate::AuthError::EmailDeliveryFailed)
    /// if the provider fails.
    pub async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        match self.email.send(to, subject, html_body).await {
            Ok(()) => {
                metrics::counter!(metric_names::EMAILS_SENT, "status" => "sent").increment(1);
                tracing::info!(to = %to, subject = %subject, "Email sent");
                Ok(())
            }
            Err(err) => {
                metrics::counter!(metric_names::EMAILS_SENT, "status" => "failed").increment(1);
                tracing::error!(to = %to, error = %err, "Error sending email");
                Err(err)
            }
        }
    }
}

impl<S, E, C> OtpChallenge for OtpService<S, E, C>
where
    S: OtpStore,
    E: EmailProvider,
    C: Clock,
{
    async fn request_code(&self, email: &str) -> Result<()> {
        self.request_otp(email).await
    }

    async fn confirm_code(&self, email: &str, code: &str) -> Result<()> {
        self.verify_otp(email, code).await
    }
}
