use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Default per-request timeout for [`ReqwestTransport`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the connector's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A single outbound POST.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

/// What came back from the endpoint. The body is read in full.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request failed before a response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP transport used by [`crate::EventConnector`].
///
/// `Ok(None)` means the transport finished without a response object;
/// the connector treats that the same as a network failure.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<Option<TransportResponse>, TransportError>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    /// Create a transport with [`DEFAULT_REQUEST_TIMEOUT`].
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT).expect("Failed to build HTTP client")
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("userevents-connector/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http_client })
    }

    /// Wrap an existing client (shared pool, custom TLS, proxies).
    pub fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<Option<TransportResponse>, TransportError> {
        let mut builder = self.http_client.post(&request.url).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(format!("request to {} failed: {}", request.url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("failed to read response body: {}", e)))?;

        Ok(Some(TransportResponse { status, body }))
    }
}
