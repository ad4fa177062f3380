//! Remote OTP challenge over the EventGate HTTP API.

use crate::error::{AuthError, Result};
use crate::providers::OtpChallenge;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Talks to `POST /otp` and `PUT /otp` of a running EventGate server.
///
/// Error bodies carry a machine-readable `code` which is mapped back onto the
/// matching [`AuthError`] variant, so a remote booking gate surfaces the same
/// errors as an in-process one.
#[derive(Clone, Debug)]
pub struct HttpOtpChallenge {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct RequestOtpBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyOtpBody<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl ErrorBody {
    /// The most specific reason the server gave.
    fn reason(self) -> String {
        self.details.unwrap_or(self.error)
    }
}

impl HttpOtpChallenge {
    /// Create a challenge client for the server at `base_url`
    /// (e.g. `http://localhost:8080`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a challenge client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn otp_url(&self) -> String {
        format!("{}/otp", self.base_url)
    }

    async fn into_result(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        Err(map_error(status, body))
    }
}

fn map_error(status: StatusCode, mut body: ErrorBody) -> AuthError {
    match body.code.take().as_deref() {
        Some("OTP_NOT_FOUND") => AuthError::OtpNotFound,
        Some("OTP_EXPIRED") => AuthError::OtpExpired,
        Some("OTP_MISMATCH") => AuthError::OtpMismatch,
        Some("INVALID_EMAIL") => AuthError::InvalidEmail(body.reason()),
        Some("EMAIL_DELIVERY_FAILED") => AuthError::EmailDeliveryFailed(body.reason()),
        _ => AuthError::ChallengeRequestFailed(format!("{status}: {}", body.reason())),
    }
}

impl OtpChallenge for HttpOtpChallenge {
    async fn request_code(&self, email: &str) -> Result<()> {
        let response = self
            .client
            .post(self.otp_url())
            .json(&RequestOtpBody { email })
            .send()
            .await
            .map_err(|e| AuthError::ChallengeRequestFailed(e.to_string()))?;

        Self::into_result(response).await
    }

    async fn confirm_code(&self, email: &str, code: &str) -> Result<()> {
        let response = self
            .client
            .put(self.otp_url())
            .json(&VerifyOtpBody { email, otp: code })
            .send()
            .await
            .map_err(|e| AuthError::ChallengeRequestFailed(e.to_string()))?;

        Self::into_result(response).await
    }
}
