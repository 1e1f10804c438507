//! Error types for event delivery.
//!
//! Failures split into two kinds callers can branch on:
//! [`ConnectorError::InvalidInput`] is permanent and raised before any network
//! call; [`ConnectorError::DeliveryFailed`] is raised once every attempt
//! allowed by the retry policy has failed.

use thiserror::Error;
use userevents::ValidationError;

/// Result type alias for connector operations.
pub type Result<T> = std::result::Result<T, ConnectorError>;

/// Top-level error returned by [`crate::EventConnector`].
#[derive(Debug, Clone, Error)]
pub enum ConnectorError {
    /// Malformed input or configuration. Never retried.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Every delivery attempt failed.
    #[error("delivery failed after {attempts} attempt(s): {last}")]
    DeliveryFailed {
        /// Number of attempts made
        attempts: u32,
        /// Outcome of the final attempt
        last: AttemptFailure,
    },
}

impl ConnectorError {
    /// Returns true for failures that retrying cannot fix.
    pub fn is_permanent(&self) -> bool {
        matches!(self, ConnectorError::InvalidInput(_))
    }

    /// Returns true for delivery failures (network or HTTP status).
    pub fn is_transient(&self) -> bool {
        matches!(self, ConnectorError::DeliveryFailed { .. })
    }

    /// HTTP status of the final attempt, if it got one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConnectorError::DeliveryFailed {
                last: AttemptFailure::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

impl From<ValidationError> for ConnectorError {
    fn from(err: ValidationError) -> Self {
        ConnectorError::InvalidInput(InputError::Validation(err))
    }
}

/// Permanent input and configuration failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The event record failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A connector identity parameter was empty or whitespace-only.
    #[error("{name} is required and must not be blank")]
    InvalidParameter {
        /// Parameter name (`platform_id`, `hostname`, `api_key`)
        name: &'static str,
    },

    /// Maximum attempts must be at least one.
    #[error("max retries must be at least 1, got {0}")]
    InvalidMaxRetries(u32),

    /// Pruning left nothing to send.
    #[error("sanitized payload is empty")]
    EmptyPayload,
}

/// Why a single delivery attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body content
        body: String,
    },

    /// The request never produced a response (connect, timeout, I/O).
    #[error("network error: {0}")]
    Transport(String),

    /// The transport completed without a response object.
    #[error("no response received")]
    NoResponse,
}
