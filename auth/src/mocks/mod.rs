//! Mock provider implementations for testing.

pub mod email;

pub use email::{MockEmailProvider, SentEmail};
