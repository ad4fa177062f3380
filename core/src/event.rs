//! Canonical event listing.
//!
//! Upstream records are normalized into [`Event`] before they reach the cache
//! or the HTTP surface. Events are immutable once fetched: a cache refresh
//! replaces the whole sequence rather than patching individual entries.

use serde::{Deserialize, Serialize};

/// A bookable event.
///
/// Serialized with camelCase field names; optional fields that are absent are
/// omitted from the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Upstream identifier, unique within a listing.
    pub id: String,

    /// Event title.
    pub title: String,

    /// Start date (`YYYY-MM-DD`).
    pub date: String,

    /// Start time (`HH:MM`).
    pub time: String,

    /// Where the event takes place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,

    /// Price label shown to the user ("Free", "Donation", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Category links or labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,

    /// Long-form description (may contain HTML from upstream).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Banner image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// External booking URL released after OTP verification.
    pub event_url: String,

    /// Secondary booking URL, when the organizer provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

/// Venue details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Venue name.
    pub name: String,

    /// Searchable address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Event {
    /// Create an event with only the required fields set.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        event_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            time: time.into(),
            venue: None,
            price: None,
            category: None,
            description: None,
            image_url: None,
            event_url: event_url.into(),
            booking_url: None,
        }
    }
}
