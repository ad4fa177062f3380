//! Axum HTTP surface for EventGate.
//!
//! Thin imperative shell over the `auth` and `events` crates: handlers parse
//! JSON, call one service operation, and map the result to a response.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, CORS
//! │  - Request parsing                      │  ← Request IDs, tracing
//! │  - Response serialization               │  ← Prometheus metrics
//! ├─────────────────────────────────────────┤
//! │         Services                        │
//! │  - OtpService (issue, verify, email)    │  ← Injected store/clock/mailer
//! │  - EventCache (fetch-or-fallback)       │  ← Injected source/clock
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use eventgate_web::{AppState, build_router};
//!
//! let app = build_router(AppState::new(otp_service, event_cache));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::{AppError, WebResult};
pub use extractors::ApiJson;
pub use router::build_router;
pub use state::AppState;
