use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

mod validation;
#[cfg(test)]
mod tests;

pub use validation::{validate, ValidationError};

/// The closed set of user-interaction kinds accepted by the ingestion API.
///
/// Wire keys are the upper snake case names carried in `event_type`
/// (e.g. `"ITEM_PAGE_VIEW"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Home,
    Land,
    ItemPageView,
    AddToCart,
    AddToWishlist,
    Search,
    PageView,
    Purchase,
}

impl EventKind {
    /// Every supported kind, in wire-key order.
    pub const ALL: [EventKind; 8] = [
        EventKind::Home,
        EventKind::Land,
        EventKind::ItemPageView,
        EventKind::AddToCart,
        EventKind::AddToWishlist,
        EventKind::Search,
        EventKind::PageView,
        EventKind::Purchase,
    ];

    /// Returns the `event_type` key used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Home => "HOME",
            EventKind::Land => "LAND",
            EventKind::ItemPageView => "ITEM_PAGE_VIEW",
            EventKind::AddToCart => "ADD_TO_CART",
            EventKind::AddToWishlist => "ADD_TO_WISHLIST",
            EventKind::Search => "SEARCH",
            EventKind::PageView => "PAGE_VIEW",
            EventKind::Purchase => "PURCHASE",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownEventType(s.to_string()))
    }
}

/// Type-specific view of a validated event.
///
/// Each variant carries the fields its kind requires. Optional and
/// unknown fields stay in the original record (see [`ValidatedEvent::record`]).
#[derive(Clone, Debug, PartialEq)]
pub enum UserEvent {
    Home,
    Land,
    ItemPageView { items: Vec<Value> },
    AddToCart { items: Vec<Value> },
    AddToWishlist { items: Vec<Value> },
    Search { search_query: String },
    PageView { page_id: String },
    Purchase { items: Vec<Value> },
}

impl UserEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UserEvent::Home => EventKind::Home,
            UserEvent::Land => EventKind::Land,
            UserEvent::ItemPageView { .. } => EventKind::ItemPageView,
            UserEvent::AddToCart { .. } => EventKind::AddToCart,
            UserEvent::AddToWishlist { .. } => EventKind::AddToWishlist,
            UserEvent::Search { .. } => EventKind::Search,
            UserEvent::PageView { .. } => EventKind::PageView,
            UserEvent::Purchase { .. } => EventKind::Purchase,
        }
    }

    /// Line items for the product and purchase kinds, `None` otherwise.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            UserEvent::ItemPageView { items }
            | UserEvent::AddToCart { items }
            | UserEvent::AddToWishlist { items }
            | UserEvent::Purchase { items } => Some(items),
            UserEvent::Home
            | UserEvent::Land
            | UserEvent::Search { .. }
            | UserEvent::PageView { .. } => None,
        }
    }
}

/// An event record that passed common and type-specific validation.
///
/// Holds the untouched ingress object alongside the typed view so that
/// fields this layer does not know about still reach the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedEvent {
    timestamp_ms: i64,
    event: UserEvent,
    record: Map<String, Value>,
}

impl ValidatedEvent {
    pub(crate) fn new(timestamp_ms: i64, event: UserEvent, record: Map<String, Value>) -> Self {
        Self {
            timestamp_ms,
            event,
            record,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    pub fn event(&self) -> &UserEvent {
        &self.event
    }

    /// Unix epoch milliseconds as parsed from `timestamp`.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        // Range was checked during validation.
        DateTime::from_timestamp_millis(self.timestamp_ms).unwrap_or_default()
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn into_record(self) -> Map<String, Value> {
        self.record
    }
}
