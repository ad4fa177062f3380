//! Scripted event source for testing.

use crate::error::Result;
use crate::source::EventSource;
use eventgate_core::Event;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Event source that replays queued responses.
///
/// Once the script is exhausted every call returns an empty listing. Clones
/// share the script and the call counter.
#[derive(Debug, Clone, Default)]
pub struct MockEventSource {
    script: Arc<Mutex<VecDeque<Result<Vec<Event>>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockEventSource {
    /// Create a source with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source that answers with `responses` in order.
    #[must_use]
    pub fn returning(responses: Vec<Result<Vec<Event>>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(responses.into())),
            calls: Arc::default(),
        }
    }

    /// Number of times `fetch_events` was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EventSource for MockEventSource {
    async fn fetch_events(&self) -> Result<Vec<Event>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
