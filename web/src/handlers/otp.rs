//! OTP endpoints.

use crate::error::{AppError, WebResult};
use crate::extractors::ApiJson;
use crate::state::AppState;
use axum::{Json, extract::State};
use eventgate_auth::providers::{EmailProvider, OtpStore};
use eventgate_core::environment::Clock;
use serde::{Deserialize, Serialize};

/// `POST /otp` request body.
#[derive(Debug, Deserialize)]
pub struct RequestOtp {
    /// Address to send the code to.
    pub email: String,
}

/// `PUT /otp` request body.
#[derive(Debug, Deserialize)]
pub struct VerifyOtp {
    /// Address the code was sent to.
    pub email: String,
    /// Code entered by the user.
    pub otp: String,
}

/// Success body.
#[derive(Debug, Serialize)]
pub struct OtpResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Issue a code and email it.
///
/// # Endpoint
///
/// ```text
/// POST /otp  { "email": "user@example.com" }
/// ```
///
/// # Responses
///
/// - 200 `{ "success": true, "message": "OTP sent successfully" }`
/// - 400 invalid address or body
/// - 500 `{ "error": "Failed to generate OTP", "details": ... }` when delivery fails
pub async fn request_otp<S, E, C, Src>(
    State(state): State<AppState<S, E, C, Src>>,
    ApiJson(body): ApiJson<RequestOtp>,
) -> WebResult<Json<OtpResponse>>
where
    S: OtpStore,
    E: EmailProvider,
    C: Clock,
{
    state
        .otp
        .request_otp(&body.email)
        .await
        .map_err(AppError::otp_request)?;

    Ok(Json(OtpResponse {
        success: true,
        message: Some("OTP sent successfully".to_string()),
    }))
}

/// Verify a submitted code.
///
/// # Endpoint
///
/// ```text
/// PUT /otp  { "email": "user@example.com", "otp": "123456" }
/// ```
///
/// # Responses
///
/// - 200 `{ "success": true }`
/// - 400 `{ "error": "No OTP found for this email" | "OTP has expired" | "Invalid OTP" }`
pub async fn verify_otp<S, E, C, Src>(
    State(state): State<AppState<S, E, C, Src>>,
    ApiJson(body): ApiJson<VerifyOtp>,
) -> WebResult<Json<OtpResponse>>
where
    S: OtpStore,
    E: EmailProvider,
    C: Clock,
{
    state.otp.verify_otp(&body.email, &body.otp).await?;

    Ok(Json(OtpResponse {
        success: true,
        message: None,
    }))
}
