//! OTP challenge trait.
//!
//! The booking gate drives the two-step flow through this seam. It is
//! implemented in-process by [`OtpService`](crate::service::OtpService) and
//! over HTTP by [`HttpOtpChallenge`](crate::providers::HttpOtpChallenge).

use crate::error::Result;

/// Request and confirm one-time codes for an email address.
pub trait OtpChallenge: Send + Sync {
    /// Issue a code for `email` and deliver it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailDeliveryFailed`](crate::AuthError::EmailDeliveryFailed)
    /// if the code could not be delivered, or a transport error for remote
    /// implementations.
    fn request_code(&self, email: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Verify a user-supplied code.
    ///
    /// # Errors
    ///
    /// Returns `OtpNotFound`, `OtpExpired` or `OtpMismatch` when the code is
    /// not accepted.
    fn confirm_code(
        &self,
        email: &str,
        code: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl<T: OtpChallenge + ?Sized> OtpChallenge for std::sync::Arc<T> {
    fn request_code(&self, email: &str) -> impl std::future::Future<Output = Result<()>> + Send {
        (**self).request_code(email)
    }

    fn confirm_code(
        &self,
        email: &str,
        code: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        (**self).confirm_code(email, code)
    }
}
