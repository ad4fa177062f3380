//! Raw email endpoint.

use crate::error::{AppError, WebResult};
use crate::extractors::ApiJson;
use crate::handlers::otp::OtpResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use eventgate_auth::providers::{EmailProvider, OtpStore};
use eventgate_core::environment::Clock;
use serde::Deserialize;

/// `POST /email` request body.
#[derive(Debug, Deserialize)]
pub struct SendEmail {
    /// Recipient.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub body: String,
}

/// Send an HTML email through the configured provider.
///
/// # Endpoint
///
/// ```text
/// POST /email  { "to": "...", "subject": "...", "body": "<p>...</p>" }
/// ```
///
/// # Responses
///
/// - 200 `{ "success": true }`
/// - 500 `{ "error": "Failed to send email" }`
pub async fn send_email<S, E, C, Src>(
    State(state): State<AppState<S, E, C, Src>>,
    ApiJson(body): ApiJson<SendEmail>,
) -> WebResult<Json<OtpResponse>>
where
    S: OtpStore,
    E: EmailProvider,
    C: Clock,
{
    state
        .otp
        .send_email(&body.to, &body.subject, &body.body)
        .await
        .map_err(|err| {
            AppError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send email",
                "EMAIL_DELIVERY_FAILED",
            )
            .with_details(err.to_string())
            .with_source(err)
        })?;

    Ok(Json(OtpResponse {
        success: true,
        message: None,
    }))
}
