//! Custom Axum extractors.
//!
//! - `ApiJson`: JSON body whose rejection renders as an [`AppError`]
//!
//! # Examples
//!
//! ```ignore
//! use eventgate_web::extractors::ApiJson;
//!
//! async fn handler(ApiJson(request): ApiJson<RequestOtp>) -> Result<Json<Response>, AppError> {
//!     // A malformed body never reaches this point; the client gets
//!     // 400 { "error": "Invalid request body", "code": "BAD_REQUEST", ... }
//!     Ok(Json(response))
//! }
//! ```

use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

/// JSON request body.
///
/// Behaves like [`axum::Json`] but rejects with the crate's error body
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
