//! OTP providers.
//!
//! This module defines traits for the external dependencies of the OTP flow
//! and their concrete implementations. The registry, service and booking gate
//! depend only on the traits:
//!
//! - [`OtpStore`]: where outstanding codes live (in-memory map, Redis)
//! - [`EmailProvider`]: how codes reach the user (SMTP, console)
//! - [`OtpChallenge`]: how a booking gate requests and confirms codes
//!   (in-process service, remote HTTP API)
//!
//! This enables:
//! - **Testing**: Use mocks (in-memory, deterministic)
//! - **Production**: Use real services (SMTP relay, Redis)
//! - **Development**: Log emails to the console instead of sending them

pub mod challenge;
pub mod console_email;
pub mod email;
pub mod http_challenge;
pub mod otp_store;
pub mod smtp_email;

pub use challenge::OtpChallenge;
pub use console_email::ConsoleEmailProvider;
pub use email::{EmailProvider, otp_email_body};
pub use http_challenge::HttpOtpChallenge;
pub use otp_store::{OtpEntry, OtpStore};
pub use smtp_email::SmtpEmailProvider;
