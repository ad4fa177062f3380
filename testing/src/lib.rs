//! # EventGate Testing
//!
//! Testing utilities shared by the EventGate crates.
//!
//! This crate provides:
//! - A controllable [`FixedClock`] for expiry and refresh-window tests
//! - Event fixtures
//! - A tracing initializer for test output
//!
//! ## Example
//!
//! ```
//! use eventgate_testing::test_clock;
//! use eventgate_core::environment::Clock;
//! use chrono::Duration;
//!
//! let clock = test_clock();
//! let start = clock.now();
//! clock.advance(Duration::minutes(6));
//! assert_eq!(clock.now() - start, Duration::minutes(6));
//! ```

use chrono::{DateTime, Utc};
use eventgate_core::environment::Clock;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::Duration;
    use std::sync::{Arc, Mutex, PoisonError};

    /// Controllable clock for deterministic tests
    ///
    /// Returns the same instant until a test moves it with [`set`](Self::set)
    /// or [`advance`](Self::advance). Clones share the same instant, so a test
    /// can keep one handle while the code under test holds another.
    ///
    /// # Example
    ///
    /// ```
    /// use eventgate_testing::mocks::FixedClock;
    /// use eventgate_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock to an absolute instant.
        pub fn set(&self, time: DateTime<Utc>) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) = time;
        }

        /// Move the clock forward (or backward, for negative durations).
        pub fn advance(&self, by: Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Event fixtures.
pub mod fixtures {
    use eventgate_core::{Event, Venue};

    /// A fully populated event with the given id.
    #[must_use]
    pub fn sample_event(id: &str) -> Event {
        Event {
            venue: Some(Venue {
                name: "Community Hall".to_string(),
                address: Some("12 Main Street".to_string()),
            }),
            price: Some("Free".to_string()),
            description: Some(format!("Description for event {id}")),
            ..Event::new(
                id,
                format!("Event {id}"),
                "2025-02-01",
                "19:00",
                format!("https://tickets.example.com/{id}"),
            )
        }
    }

    /// `count` sample events with ids `"1"..=count`.
    #[must_use]
    pub fn sample_events(count: usize) -> Vec<Event> {
        (1..=count).map(|i| sample_event(&i.to_string())).collect()
    }
}

/// Install a test-friendly tracing subscriber (idempotent).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use fixtures::{sample_event, sample_events};
pub use mocks::{FixedClock, test_clock};
