use crate::client::EventConnector;
use crate::identity::ConnectorIdentity;
use crate::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
use crate::transport::{ReqwestTransport, DEFAULT_REQUEST_TIMEOUT};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

pub const PLATFORM_ID_VAR: &str = "RMP_PLATFORM_ID";
pub const HOSTNAME_VAR: &str = "RMP_HOSTNAME";
pub const API_KEY_VAR: &str = "RMP_API_KEY";
pub const MAX_RETRIES_VAR: &str = "RMP_MAX_RETRIES";
pub const REQUEST_TIMEOUT_VAR: &str = "RMP_REQUEST_TIMEOUT_SECS";

/// Connector settings.
///
/// Loads from environment variables:
/// - `RMP_PLATFORM_ID` (required)
/// - `RMP_HOSTNAME` (required)
/// - `RMP_API_KEY` (required)
/// - `RMP_MAX_RETRIES` (optional, default 3)
/// - `RMP_REQUEST_TIMEOUT_SECS` (optional, default 10)
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub identity: ConnectorIdentity,
    pub retry_policy: RetryPolicy,
    pub request_timeout: Duration,
}

impl ConnectorConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Result<Self> {
        let platform_id =
            std::env::var(PLATFORM_ID_VAR).context(format!("{} not set", PLATFORM_ID_VAR))?;
        let hostname = std::env::var(HOSTNAME_VAR).context(format!("{} not set", HOSTNAME_VAR))?;
        let api_key = std::env::var(API_KEY_VAR).context(format!("{} not set", API_KEY_VAR))?;

        let identity = ConnectorIdentity::new(platform_id, hostname, api_key)
            .context("Invalid connector identity")?;

        let max_retries = match std::env::var(MAX_RETRIES_VAR) {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .context(format!("{} must be a positive integer", MAX_RETRIES_VAR))?,
            Err(_) => DEFAULT_MAX_ATTEMPTS,
        };
        let retry_policy = RetryPolicy::new(max_retries)
            .context(format!("{} must be a positive integer", MAX_RETRIES_VAR))?;

        let request_timeout = match std::env::var(REQUEST_TIMEOUT_VAR) {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .context(format!("{} must be a number of seconds", REQUEST_TIMEOUT_VAR))?,
            ),
            Err(_) => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            identity,
            retry_policy,
            request_timeout,
        })
    }

    /// Builds a reqwest-backed connector from this config.
    pub fn into_connector(self) -> Result<EventConnector> {
        let transport = ReqwestTransport::with_timeout(self.request_timeout)?;
        Ok(EventConnector::with_transport(self.identity, Arc::new(transport))
            .with_retry_policy(self.retry_policy))
    }
}
