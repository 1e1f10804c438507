// Event model and validation
pub mod event;

// Null pruning of outgoing payloads
pub mod sanitize;

pub use event::{validate, EventKind, UserEvent, ValidatedEvent, ValidationError};
pub use sanitize::prune;
