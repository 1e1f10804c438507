use super::{EventKind, UserEvent, ValidatedEvent};
use chrono::DateTime;
use serde_json::{Map, Value};
use std::fmt;

/// Validation errors for incoming user events
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingEvent,
    NotAnObject,
    MissingTimestamp { body: String },
    InvalidTimestamp { body: String },
    MissingEventType,
    UnknownEventType(String),
    /// `items` absent or empty on a product-page or cart/wishlist event
    MissingItems(EventKind),
    MissingPurchaseItems,
    MissingSearchQuery,
    MissingPageId,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingEvent => write!(f, "event is required"),
            ValidationError::NotAnObject => write!(f, "event must be a JSON object"),
            ValidationError::MissingTimestamp { body } => {
                write!(f, "timestamp is required, event: {}", body)
            }
            ValidationError::InvalidTimestamp { body } => {
                write!(
                    f,
                    "timestamp must be a Unix epoch milliseconds number, event: {}",
                    body
                )
            }
            ValidationError::MissingEventType => write!(f, "event_type is required"),
            ValidationError::UnknownEventType(t) => {
                write!(f, "unsupported event_type '{}'", t)
            }
            ValidationError::MissingItems(kind) => {
                write!(
                    f,
                    "{} event requires a non-empty items array of product entries",
                    kind
                )
            }
            ValidationError::MissingPurchaseItems => {
                write!(f, "PURCHASE event requires a non-empty items array of purchased lines")
            }
            ValidationError::MissingSearchQuery => {
                write!(f, "SEARCH event requires a non-empty search_query")
            }
            ValidationError::MissingPageId => {
                write!(f, "PAGE_VIEW event requires a non-empty page_id")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a raw event record and returns its typed view.
///
/// Validation rules:
/// - Event must be a non-null JSON object
/// - `timestamp`: number or numeric string, Unix epoch milliseconds
/// - `event_type`: one of [`EventKind::ALL`]
/// - Kind-specific fields (`items`, `search_query`, `page_id`)
///
/// The record itself is not modified; null pruning happens later.
pub fn validate(event: &Value) -> Result<ValidatedEvent, ValidationError> {
    let record = match event {
        Value::Null => return Err(ValidationError::MissingEvent),
        Value::Object(record) => record,
        _ => return Err(ValidationError::NotAnObject),
    };

    let timestamp_ms = match record.get("timestamp") {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingTimestamp {
                body: event.to_string(),
            })
        }
        Some(raw) => parse_timestamp(raw).ok_or_else(|| ValidationError::InvalidTimestamp {
            body: event.to_string(),
        })?,
    };

    let kind = match record.get("event_type") {
        None | Some(Value::Null) => return Err(ValidationError::MissingEventType),
        Some(Value::String(name)) if name.is_empty() => {
            return Err(ValidationError::MissingEventType)
        }
        Some(Value::String(name)) => name.parse::<EventKind>()?,
        Some(other) => return Err(ValidationError::UnknownEventType(other.to_string())),
    };

    let typed = apply_rule(kind, record)?;
    Ok(ValidatedEvent::new(timestamp_ms, typed, record.clone()))
}

/// Runs the kind-specific rule against the record.
fn apply_rule(kind: EventKind, record: &Map<String, Value>) -> Result<UserEvent, ValidationError> {
    let product_items = || required_items(record).ok_or(ValidationError::MissingItems(kind));

    match kind {
        EventKind::Home => Ok(UserEvent::Home),
        EventKind::Land => Ok(UserEvent::Land),
        EventKind::ItemPageView => Ok(UserEvent::ItemPageView {
            items: product_items()?,
        }),
        EventKind::AddToCart => Ok(UserEvent::AddToCart {
            items: product_items()?,
        }),
        EventKind::AddToWishlist => Ok(UserEvent::AddToWishlist {
            items: product_items()?,
        }),
        EventKind::Search => Ok(UserEvent::Search {
            search_query: required_text(record, "search_query")
                .ok_or(ValidationError::MissingSearchQuery)?,
        }),
        EventKind::PageView => Ok(UserEvent::PageView {
            page_id: required_text(record, "page_id").ok_or(ValidationError::MissingPageId)?,
        }),
        EventKind::Purchase => Ok(UserEvent::Purchase {
            items: required_items(record).ok_or(ValidationError::MissingPurchaseItems)?,
        }),
    }
}

/// Coerces a timestamp value to epoch milliseconds.
///
/// Accepts JSON numbers and numeric strings. Fractional values are
/// truncated. Returns `None` for anything chrono cannot represent.
fn parse_timestamp(raw: &Value) -> Option<i64> {
    let millis = match raw {
        Value::Number(n) => n.as_i64().or_else(|| finite_millis(n.as_f64()?))?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| finite_millis(s.parse::<f64>().ok()?))?
        }
        _ => return None,
    };

    DateTime::from_timestamp_millis(millis).map(|_| millis)
}

fn finite_millis(value: f64) -> Option<i64> {
    value.is_finite().then_some(value as i64)
}

fn required_items(record: &Map<String, Value>) -> Option<Vec<Value>> {
    match record.get("items")? {
        Value::Array(items) if !items.is_empty() => Some(items.clone()),
        _ => None,
    }
}

/// Non-empty string, or a number carried as its decimal form.
fn required_text(record: &Map<String, Value>, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
