//! User Event Connector - Delivers validated user events to the ingestion API.
//!
//! Upstream instrumentation hands a raw JSON event to [`EventConnector::send`],
//! which validates it, strips null fields and POSTs it to the platform's
//! user-events endpoint, retrying transient failures.
//!
//! # Pipeline
//!
//! ```text
//! raw event (serde_json::Value)
//!          ↓
//!     validate (userevents::validate)
//!          ↓
//!     prune nulls (userevents::prune)
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       EventConnector                     │
//! │  - Build platform URL                    │
//! │  - POST with API key header              │
//! │  - Retry with exponential backoff        │
//! └─────────────────────────────────────────┘
//!          ↓
//! POST {hostname}/rmp/event/v1/platforms/{platform_id}/userevents
//! ```
//!
//! # Errors
//!
//! - [`ConnectorError::InvalidInput`] - malformed event or configuration, raised immediately
//! - [`ConnectorError::DeliveryFailed`] - every attempt failed; carries the last status/body or network error
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use userevents_connector::{ConnectorError, EventConnector};
//!
//! # async fn run() -> Result<(), ConnectorError> {
//! let mut connector = EventConnector::new("platform-123", "https://ingest.example.com", "api-key")?;
//! connector.set_max_retries(5)?;
//!
//! let body = connector
//!     .send(&json!({
//!         "timestamp": "1707668400000",
//!         "event_type": "SEARCH",
//!         "search_query": "running shoes",
//!     }))
//!     .await?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod retry;
pub mod transport;

// Re-export public types
pub use client::EventConnector;
pub use config::ConnectorConfig;
pub use error::{AttemptFailure, ConnectorError, InputError};
pub use identity::ConnectorIdentity;
pub use retry::RetryPolicy;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse};

// Re-export the event model for convenience
pub use userevents::{EventKind, UserEvent, ValidatedEvent, ValidationError};
