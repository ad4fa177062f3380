//! Mock email provider for testing.

use crate::error::{AuthError, Result};
use crate::providers::EmailProvider;
use std::sync::{Arc, Mutex, PoisonError};

/// A message captured by [`MockEmailProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Recipient.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Mock email provider.
///
/// Records every successfully "sent" message. Clones share the outbox, so a
/// test can keep a handle after moving the provider into a service.
#[derive(Debug, Clone)]
pub struct MockEmailProvider {
    /// Whether to simulate success or failure.
    pub should_succeed: bool,
    outbox: Arc<Mutex<Vec<SentEmail>>>,
}

impl MockEmailProvider {
    /// Create a new mock email provider that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            should_succeed: true,
            outbox: Arc::default(),
        }
    }

    /// Create a mock whose every send fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_succeed: false,
            ..Self::new()
        }
    }

    /// Messages sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The OTP code in the most recent message, if any.
    #[must_use]
    pub fn last_code(&self) -> Option<String> {
        let sent = self.sent();
        let body = &sent.last()?.html_body;
        let start = body.find("<strong>")? + "<strong>".len();
        let end = start + body[start..].find("</strong>")?;
        Some(body[start..end].to_string())
    }
}

impl Default for MockEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailProvider for MockEmailProvider {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        if !self.should_succeed {
            return Err(AuthError::EmailDeliveryFailed(
                "mock transport rejected the message".to_string(),
            ));
        }

        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                html_body: html_body.to_string(),
            });
        Ok(())
    }
}
