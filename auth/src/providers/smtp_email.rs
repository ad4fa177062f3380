//! SMTP email provider implementation using Lettre.

use crate::error::{AuthError, Result};
use crate::providers::EmailProvider;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP email provider using Lettre.
///
/// This provider sends real emails via an SMTP relay with STARTTLS, suitable
/// for production use.
///
/// # Configuration
///
/// - `smtp_server`: SMTP server address (e.g., "smtp.gmail.com")
/// - `smtp_port`: SMTP server port (usually 587 for STARTTLS)
/// - `smtp_username` / `smtp_password`: credentials (skipped when the username is empty)
/// - `from_email`: Sender email address
/// - `from_name`: Sender display name
///
/// # Examples
///
/// ```ignore
/// use eventgate_auth::providers::SmtpEmailProvider;
///
/// let provider = SmtpEmailProvider::new(
///     "smtp.gmail.com",
///     587,
///     "user@gmail.com".to_string(),
///     "app_password".to_string(),
///     "noreply@example.com".to_string(),
///     "Event Booking".to_string(),
/// )?;
/// ```
#[derive(Clone)]
pub struct SmtpEmailProvider {
    /// Pooled async transport.
    mailer: AsyncSmtpTransport<Tokio1Executor>,

    /// Sender email address.
    from_email: String,

    /// Sender display name.
    from_name: String,
}

impl SmtpEmailProvider {
    /// Create a new SMTP email provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailDeliveryFailed`] if the relay address is invalid.
    pub fn new(
        smtp_server: &str,
        smtp_port: u16,
        smtp_username: String,
        smtp_password: String,
        from_email: String,
        from_name: String,
    ) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_server)
            .map_err(|e| AuthError::EmailDeliveryFailed(format!("SMTP relay error: {e}")))?
            .port(smtp_port);

        if !smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(smtp_username, smtp_password));
        }

        tracing::info!(server = smtp_server, port = smtp_port, "SMTP email provider configured");

        Ok(Self {
            mailer: builder.build(),
            from_email,
            from_name,
        })
    }

    /// Build the "From" header.
    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

impl EmailProvider for SmtpEmailProvider {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        let from = self.from_header().parse().map_err(|e| {
            AuthError::EmailDeliveryFailed(format!("Invalid from address: {e}"))
        })?;
        let recipient = to
            .parse()
            .map_err(|e| AuthError::EmailDeliveryFailed(format!("Invalid to address: {e}")))?;

        let email = Message::builder()
            .from(from)
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| AuthError::EmailDeliveryFailed(format!("Failed to build email: {e}")))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AuthError::EmailDeliveryFailed(format!("Failed to send email: {e}")))?;

        tracing::debug!(to = %to, subject = %subject, "Email handed to SMTP relay");
        Ok(())
    }
}
