//! # EventGate Events
//!
//! Fetches the event listing from the Eventyay API and caches it in a local
//! JSON file so the listing page does not hit upstream on every request.
//!
//! ```text
//! GET /events ──▶ EventCache::get ──┬─ fresh file ──────────────▶ Cached
//!                                   └─ stale/empty ─▶ EventSource ─▶ Fresh | Stale
//! ```
//!
//! A refresh is attempted at most once per refresh window (5 minutes by
//! default). Upstream failures never surface as errors to the caller; the
//! previously cached events are served with an error note instead.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod cache;
pub mod envelope;
pub mod error;
pub mod eventyay;
pub mod source;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use cache::{CacheRead, CacheSource, EventCache, EventCacheConfig};
pub use envelope::{CacheEnvelope, CacheMetadata};
pub use error::{EventsError, Result};
pub use eventyay::EventyayClient;
pub use source::EventSource;
