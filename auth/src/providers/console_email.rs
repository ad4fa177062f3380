//! Console email provider for development.

use crate::error::Result;
use crate::providers::EmailProvider;
use tracing::info;

/// Console email provider.
///
/// Logs emails instead of sending them. Used when no SMTP relay is
/// configured, so the OTP can be read from the server output.
#[derive(Clone, Debug, Default)]
pub struct ConsoleEmailProvider;

impl ConsoleEmailProvider {
    /// Create a new console email provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EmailProvider for ConsoleEmailProvider {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        info!(to = %to, subject = %subject, "📧 Email (Development Mode)");
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║ To: {to:<57}║");
        println!("║ Subject: {subject:<52}║");
        println!("╠══════════════════════════════════════════════════════════════╣");
        for line in html_body.lines().map(str::trim).filter(|line| !line.is_empty()) {
            println!("║ {line}");
        }
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        Ok(())
    }
}
