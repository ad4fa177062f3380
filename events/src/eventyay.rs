//! Eventyay events API adapter.
//!
//! Fetches `GET {base}/events?sort=starts-at&page[size]={n}` and normalizes
//! each JSON:API resource into an [`Event`].

use crate::error::{EventsError, Result};
use crate::source::EventSource;
use chrono::DateTime;
use eventgate_core::{Event, Venue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Default upstream base URL.
pub const DEFAULT_API_URL: &str = "https://api.eventyay.com/v1";

/// Default number of events requested per fetch.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Eventyay API client.
#[derive(Clone, Debug)]
pub struct EventyayClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl EventyayClient {
    /// Create a client with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`EventsError::UpstreamUnavailable`] if the HTTP client cannot
    /// be constructed (e.g. the TLS backend fails to initialize).
    pub fn new(base_url: impl Into<String>, page_size: u32, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EventsError::UpstreamUnavailable(e.to_string()))?;

        Ok(Self::with_client(client, base_url, page_size))
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size,
        }
    }

    /// URL of the events listing request.
    #[must_use]
    pub fn events_url(&self) -> String {
        format!(
            "{}/events?sort=starts-at&page[size]={}",
            self.base_url, self.page_size
        )
    }

    /// Fetch and normalize, reporting upstream failures.
    ///
    /// # Errors
    ///
    /// - [`EventsError::UpstreamUnavailable`]: connection or timeout failure
    /// - [`EventsError::UpstreamStatus`]: non-200 response
    /// - [`EventsError::MalformedResponse`]: body is not a JSON:API document
    pub async fn try_fetch_events(&self) -> Result<Vec<Event>> {
        let response = self
            .client
            .get(self.events_url())
            .header("accept", "application/vnd.api+json")
            .send()
            .await
            .map_err(|e| EventsError::UpstreamUnavailable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let document = response
                    .json::<EventsDocument>()
                    .await
                    .map_err(|e| EventsError::MalformedResponse(e.to_string()))?;
                Ok(normalize_document(document))
            }
            status => Err(EventsError::UpstreamStatus(status.as_u16())),
        }
    }
}

impl EventSource for EventyayClient {
    /// Upstream failures are logged and yield an empty listing.
    async fn fetch_events(&self) -> Result<Vec<Event>> {
        match self.try_fetch_events().await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "Fetched events from Eventyay");
                Ok(events)
            }
            Err(err) => {
                tracing::warn!(url = %self.events_url(), error = %err, "Error fetching events");
                Ok(Vec::new())
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// JSON:API wire types
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct EventsDocument {
    #[serde(default)]
    data: Vec<EventResource>,
}

#[derive(Debug, Deserialize)]
struct EventResource {
    id: String,
    #[serde(default)]
    attributes: EventAttributes,
    #[serde(default)]
    relationships: Option<EventRelationships>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct EventAttributes {
    name: Option<String>,
    description: Option<String>,
    original_image_url: Option<String>,
    logo_url: Option<String>,
    ticket_url: Option<String>,
    starts_at: Option<String>,
    location_name: Option<String>,
    searchable_location_name: Option<String>,
    is_donation_enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct EventRelationships {
    #[serde(rename = "event-type")]
    event_type: Option<Relationship>,
}

#[derive(Debug, Deserialize)]
struct Relationship {
    links: Option<RelationshipLinks>,
}

#[derive(Debug, Deserialize)]
struct RelationshipLinks {
    related: Option<String>,
}

fn normalize_document(document: EventsDocument) -> Vec<Event> {
    document
        .data
        .into_iter()
        .filter_map(|resource| {
            let id = resource.id.clone();
            let event = normalize(resource);
            if event.is_none() {
                tracing::debug!(event_id = %id, "Skipping event without ticket URL or start time");
            }
            event
        })
        .collect()
}

/// Non-empty string or `None`.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn normalize(resource: EventResource) -> Option<Event> {
    let attrs = resource.attributes;

    let event_url = present(attrs.ticket_url)?;
    // Rendered in the offset the organizer published, not the server's zone.
    let starts_at = DateTime::parse_from_rfc3339(attrs.starts_at.as_deref()?.trim()).ok()?;

    let venue = present(attrs.location_name).map(|name| Venue {
        name,
        address: present(attrs.searchable_location_name),
    });

    let price = if attrs.is_donation_enabled.unwrap_or(false) {
        "Donation"
    } else {
        "Free"
    };

    let category = resource
        .relationships
        .and_then(|r| r.event_type)
        .and_then(|t| t.links)
        .and_then(|l| present(l.related))
        .map(|related| vec![related]);

    Some(Event {
        id: resource.id,
        title: attrs.name.unwrap_or_default(),
        date: starts_at.format("%Y-%m-%d").to_string(),
        time: starts_at.format("%H:%M").to_string(),
        venue,
        price: Some(price.to_string()),
        category,
        description: present(attrs.description),
        image_url: present(attrs.original_image_url).or_else(|| present(attrs.logo_url)),
        event_url,
        booking_url: None,
    })
}
