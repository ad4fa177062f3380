//! Event listing endpoint.

use crate::state::AppState;
use axum::{Json, extract::State};
use eventgate_core::Event;
use eventgate_events::{CacheSource, EventSource};
use serde::Serialize;

/// `GET /events` response body.
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    /// Events to display.
    pub events: Vec<Event>,

    /// Present when a refresh failed and cached events were served.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// List events through the cache.
///
/// Always 200: upstream and cache-file failures are reported in `error`
/// alongside whatever events are available.
///
/// # Endpoint
///
/// ```text
/// GET /events
/// ```
pub async fn list_events<S, E, C, Src>(
    State(state): State<AppState<S, E, C, Src>>,
) -> Json<EventsResponse>
where
    C: eventgate_core::environment::Clock,
    Src: EventSource,
{
    let read = state.events.get().await;

    if read.source != CacheSource::Cached {
        tracing::debug!(source = read.source.as_str(), count = read.events.len(), "Served events");
    }

    Json(EventsResponse {
        events: read.events,
        error: read.error,
    })
}
