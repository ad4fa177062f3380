//! Error types for web handlers.
//!
//! Bridges domain errors and HTTP responses. Every error renders as
//!
//! ```json
//! { "error": "Invalid OTP", "code": "OTP_MISMATCH", "details": "..." }
//! ```
//!
//! where `details` is present only when there is more to say than `error`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventgate_auth::AuthError;
use serde::Serialize;
use std::fmt;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;

/// Application error type for web handlers.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: &'static str,
    /// Extra user-facing detail
    details: Option<String>,
    /// Underlying domain error (for logging, not exposed to client)
    source: Option<AuthError>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            details: None,
            source: None,
        }
    }

    /// Attach a user-facing detail string.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach the domain error that caused this response.
    #[must_use]
    pub fn with_source(mut self, source: AuthError) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Map an OTP error raised while requesting a code.
    ///
    /// Delivery and storage failures are reported as
    /// "Failed to generate OTP" with the cause in `details`.
    #[must_use]
    pub fn otp_request(err: AuthError) -> Self {
        if err.is_user_error() {
            return err.into();
        }
        let details = err.to_string();
        Self::from(err)
            .with_message("Failed to generate OTP")
            .with_details(details)
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Human-readable error message.
    error: String,
    /// Error code (for client error handling).
    code: &'static str,
    /// Extra detail, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    details = ?self.details,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            error: self.message,
            code: self.code,
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let (status, code) = match &err {
            AuthError::OtpNotFound => (StatusCode::BAD_REQUEST, "OTP_NOT_FOUND"),
            AuthError::OtpExpired => (StatusCode::BAD_REQUEST, "OTP_EXPIRED"),
            AuthError::OtpMismatch => (StatusCode::BAD_REQUEST, "OTP_MISMATCH"),
            AuthError::InvalidEmail(_) => (StatusCode::BAD_REQUEST, "INVALID_EMAIL"),
            AuthError::EmailDeliveryFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "EMAIL_DELIVERY_FAILED")
            }
            AuthError::StoreUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_UNAVAILABLE")
            }
            AuthError::TtlOutOfRange
            | AuthError::SerializationError(_)
            | AuthError::InvalidTransition { .. }
            | AuthError::ChallengeRequestFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
            }
        };
        let app_error = Self::new(status, err.to_string(), code);
        if status.is_server_error() {
            app_error.with_source(err)
        } else {
            app_error
        }
    }
}

/// Malformed or missing JSON bodies.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid request body").with_details(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Invalid input");
    }

    #[test]
    fn test_verification_errors_are_bad_requests() {
        for (auth, code, message) in [
            (AuthError::OtpNotFound, "OTP_NOT_FOUND", "No OTP found for this email"),
            (AuthError::OtpExpired, "OTP_EXPIRED", "OTP has expired"),
            (AuthError::OtpMismatch, "OTP_MISMATCH", "Invalid OTP"),
        ] {
            let err = AppError::from(auth);
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.code(), code);
            assert_eq!(err.message, message);
        }
    }

    #[test]
    fn test_otp_request_failure_carries_details() {
        let err = AppError::otp_request(AuthError::EmailDeliveryFailed("relay refused".into()));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "EMAIL_DELIVERY_FAILED");
        assert_eq!(err.message, "Failed to generate OTP");
        assert_eq!(err.details.as_deref(), Some("Failed to send email: relay refused"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_client_errors_carry_no_source() {
        assert!(AppError::from(AuthError::OtpMismatch).source().is_none());
    }

    #[test]
    fn test_otp_request_invalid_email_stays_client_error() {
        let err = AppError::otp_request(AuthError::InvalidEmail("nobody".into()));

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_EMAIL");
    }
}
