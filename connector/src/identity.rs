use crate::error::{InputError, Result};

/// Path template appended to the endpoint hostname.
const USER_EVENTS_PATH: &str = "/rmp/event/v1/platforms/{platform_id}/userevents";

/// Identity of a connector against the ingestion API.
///
/// All three values are trimmed and checked once at construction, then
/// stay fixed for the lifetime of the connector.
#[derive(Clone)]
pub struct ConnectorIdentity {
    platform_id: String,
    hostname: String,
    api_key: String,
}

impl ConnectorIdentity {
    /// Validates and builds an identity.
    ///
    /// Fails with [`InputError::InvalidParameter`] naming the first parameter
    /// that is empty after trimming.
    pub fn new(
        platform_id: impl AsRef<str>,
        hostname: impl AsRef<str>,
        api_key: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self {
            platform_id: required("platform_id", platform_id.as_ref())?,
            hostname: required("hostname", hostname.as_ref())?,
            api_key: required("api_key", api_key.as_ref())?,
        })
    }

    pub fn platform_id(&self) -> &str {
        &self.platform_id
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Builds `{hostname}/rmp/event/v1/platforms/{platform_id}/userevents`.
    pub fn event_url(&self) -> String {
        let host = self.hostname.strip_suffix('/').unwrap_or(&self.hostname);
        let path = USER_EVENTS_PATH.replace("{platform_id}", &self.platform_id);
        format!("{}{}", host, path)
    }
}

// The API key never ends up in logs.
impl std::fmt::Debug for ConnectorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorIdentity")
            .field("platform_id", &self.platform_id)
            .field("hostname", &self.hostname)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn required(name: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::InvalidParameter { name }.into());
    }
    Ok(trimmed.to_string())
}
