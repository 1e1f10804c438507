//! Event delivery to the user-events ingestion endpoint.
//!
//! Each `send` call runs validation, pruning and then a bounded retry loop:
//!
//! ```text
//! VALIDATING -> SANITIZING -> ATTEMPT(1) -> SUCCESS
//!                                  |
//!                            backoff, ATTEMPT(n+1) ... -> EXHAUSTED
//! ```
//!
//! Validation and pruning failures are raised straight away. Only the
//! network step is retried.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};
use userevents::{prune, validate, ValidationError};

use crate::error::{AttemptFailure, ConnectorError, InputError, Result};
use crate::identity::ConnectorIdentity;
use crate::retry::{Backoff, RetryPolicy};
use crate::transport::{
    ReqwestTransport, Transport, TransportRequest, TransportResponse, API_KEY_HEADER,
};

/// Client-side connector for the user-events ingestion API.
///
/// Construct once and share (`&self` methods, `Send + Sync`). Identity and
/// retry policy are fixed after construction apart from
/// [`EventConnector::set_max_retries`], which needs `&mut self`.
pub struct EventConnector {
    identity: ConnectorIdentity,
    policy: RetryPolicy,
    transport: Arc<dyn Transport>,
}

impl EventConnector {
    /// Creates a connector backed by [`ReqwestTransport`].
    ///
    /// Fails with [`InputError::InvalidParameter`] if any value is blank.
    pub fn new(
        platform_id: impl AsRef<str>,
        hostname: impl AsRef<str>,
        api_key: impl AsRef<str>,
    ) -> Result<Self> {
        let identity = ConnectorIdentity::new(platform_id, hostname, api_key)?;
        Ok(Self::with_transport(identity, Arc::new(ReqwestTransport::new())))
    }

    /// Creates a connector with a caller-supplied transport.
    pub fn with_transport(identity: ConnectorIdentity, transport: Arc<dyn Transport>) -> Self {
        Self {
            identity,
            policy: RetryPolicy::default(),
            transport,
        }
    }

    /// Sets the maximum number of attempts per `send` (must be at least 1).
    pub fn set_max_retries(&mut self, max_retries: u32) -> Result<()> {
        self.policy = RetryPolicy::new(max_retries)?;
        Ok(())
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.policy.max_attempts()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn identity(&self) -> &ConnectorIdentity {
        &self.identity
    }

    /// Target URL for every delivery from this connector.
    pub fn event_url(&self) -> String {
        self.identity.event_url()
    }

    /// Validates, prunes and delivers one event.
    ///
    /// Returns the response body of the first 2xx response. Input problems
    /// fail with [`ConnectorError::InvalidInput`] before any request is made;
    /// failed requests are retried with exponential backoff and end in
    /// [`ConnectorError::DeliveryFailed`] once the policy is exhausted.
    pub async fn send(&self, event: &Value) -> Result<String> {
        if event.is_null() {
            return Err(ValidationError::MissingEvent.into());
        }

        let validated = validate(event)?;
        let kind = validated.kind();

        let payload = prune(Value::Object(validated.into_record()));
        if payload.is_null() {
            return Err(InputError::EmptyPayload.into());
        }

        let request = TransportRequest {
            url: self.event_url(),
            headers: vec![
                ("Accept", "application/json".to_string()),
                ("Content-Type", "application/json".to_string()),
                (API_KEY_HEADER, self.identity.api_key().to_string()),
            ],
            body: payload.to_string(),
        };

        self.deliver(request, kind.as_str()).await
    }

    /// Retry loop. Each call owns its own [`Backoff`] state.
    async fn deliver(&self, request: TransportRequest, event_type: &str) -> Result<String> {
        let mut backoff = Backoff::new(self.policy);

        loop {
            let attempt = backoff.attempt();
            debug!(
                platform_id = %self.identity.platform_id(),
                event_type = %event_type,
                attempt = attempt,
                "Posting user event"
            );

            let failure = match self.transport.post(request.clone()).await {
                Ok(Some(response)) if response.is_success() => {
                    info!(
                        platform_id = %self.identity.platform_id(),
                        event_type = %event_type,
                        status = response.status,
                        attempt = attempt,
                        "User event delivered"
                    );
                    return Ok(response.body);
                }
                Ok(Some(TransportResponse { status, body })) => {
                    AttemptFailure::Status { status, body }
                }
                Ok(None) => AttemptFailure::NoResponse,
                Err(e) => AttemptFailure::Transport(e.to_string()),
            };

            if backoff.is_last_attempt() {
                error!(
                    platform_id = %self.identity.platform_id(),
                    event_type = %event_type,
                    attempts = attempt,
                    error = %failure,
                    "User event delivery failed, retries exhausted"
                );
                return Err(ConnectorError::DeliveryFailed {
                    attempts: attempt,
                    last: failure,
                });
            }

            warn!(
                platform_id = %self.identity.platform_id(),
                event_type = %event_type,
                attempt = attempt,
                max_attempts = self.policy.max_attempts(),
                error = %failure,
                "User event delivery failed, will retry"
            );

            let delay = backoff.advance();
            debug!(
                event_type = %event_type,
                delay_ms = delay.as_millis() as u64,
                "Backing off before retry"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

impl std::fmt::Debug for EventConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventConnector")
            .field("identity", &self.identity)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
