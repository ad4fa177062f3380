//! Event source trait.

use crate::error::Result;
use eventgate_core::Event;

/// Something that can produce the current event listing.
///
/// Implemented by [`EventyayClient`](crate::EventyayClient) in production and
/// by a scripted mock in tests.
pub trait EventSource: Send + Sync {
    /// Fetch the current listing, ordered by ascending start time.
    ///
    /// # Errors
    ///
    /// Implementations may report upstream failures; the cache treats both an
    /// error and an empty listing as a failed refresh.
    fn fetch_events(&self) -> impl std::future::Future<Output = Result<Vec<Event>>> + Send;
}

impl<T: EventSource + ?Sized> EventSource for std::sync::Arc<T> {
    fn fetch_events(&self) -> impl std::future::Future<Output = Result<Vec<Event>>> + Send {
        (**self).fetch_events()
    }
}
