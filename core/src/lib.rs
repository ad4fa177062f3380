//! # EventGate Core
//!
//! Domain types and environment traits shared by every EventGate crate.
//!
//! ## Core Concepts
//!
//! - **Event**: a normalized listing fetched from the upstream events API
//! - **Environment**: external dependencies (time) injected via traits
//!
//! Everything that touches the outside world lives in the `auth`, `events`
//! and `web` crates; this crate only defines the shapes they agree on.

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

pub mod event;

pub use event::{Event, Venue};

/// Environment module - Dependency injection traits
///
/// All time-dependent decisions (OTP expiry, cache refresh windows) read the
/// current instant through [`Clock`](environment::Clock) so tests can pin or
/// advance it.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use eventgate_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system wall clock.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
        fn now(&self) -> DateTime<Utc> {
            (**self).now()
        }
    }
}
