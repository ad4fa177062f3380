//! # EventGate Authentication
//!
//! Email one-time passwords guarding access to an event's booking link.
//!
//! ## Features
//!
//! - **Six-digit codes**: uniformly random, five minute lifetime, single use
//! - **Pluggable storage**: in-memory or Redis behind [`providers::OtpStore`]
//! - **Pluggable delivery**: SMTP or console behind [`providers::EmailProvider`]
//! - **Testable**: clock and store are injected, so expiry runs at memory speed
//!
//! ## Architecture
//!
//! ```text
//! BookingGate ──▶ OtpChallenge ──┬─▶ OtpService ──▶ OtpRegistry ──▶ OtpStore
//!                                │        └──────▶ EmailProvider
//!                                └─▶ HttpOtpChallenge ──▶ POST/PUT /otp
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use eventgate_auth::*;
//!
//! let registry = OtpRegistry::new(InMemoryOtpStore::new(), SystemClock, &OtpConfig::default());
//! let service = OtpService::new(registry, ConsoleEmailProvider::new());
//!
//! let mut gate = BookingGate::new(service, &event);
//! gate.submit_email("user@example.com").await?;
//! let booking_url = gate.submit_code("123456").await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod providers;
pub mod registry;
pub mod service;
pub mod stores;
pub mod utils;

// Mock providers for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use config::OtpConfig;
pub use error::{AuthError, Result};
pub use gate::{BookingGate, BookingState};
pub use registry::{IssuedOtp, OtpRegistry};
pub use service::OtpService;
pub use stores::{InMemoryOtpStore, RedisOtpStore};
