//! Authenticated JSON fetcher shared by listing and album requests.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::FetchError;
use crate::user_agent;

/// Default connect timeout for API requests.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default read timeout for API requests.
pub const READ_TIMEOUT_SECS: u64 = 30;

/// JSON client for the listing and album APIs.
///
/// Every request carries the crate's User-Agent and, when a credential is
/// configured, an `Authorization: Client-ID <credential>` header. There is no
/// retry at this layer.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    client_id: Option<String>,
}

impl ApiClient {
    /// Creates a client with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] when the HTTP client cannot be built.
    pub fn new(client_id: Option<String>) -> Result<Self, FetchError> {
        Self::with_timeouts(client_id, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] when the HTTP client cannot be built.
    pub fn with_timeouts(
        client_id: Option<String>,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent::default_user_agent())
            .gzip(true)
            .build()
            .map_err(|source| FetchError::Client { source })?;
        let client_id = client_id.filter(|id| !id.trim().is_empty());
        Ok(Self { client, client_id })
    }

    #[cfg(test)]
    fn has_credential(&self) -> bool {
        self.client_id.is_some()
    }

    /// Fetches `url` and decodes the body as `T`.
    ///
    /// Non-2xx responses are not treated as errors on their own: album
    /// lookups report failures inside a JSON body, so the body is always
    /// decoded and the status only enriches decode errors.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] on network failure and
    /// [`FetchError::Decode`] when the body is not the expected JSON.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let mut request = self.client.get(url);
        if let Some(client_id) = &self.client_id {
            request = request.header(AUTHORIZATION, format!("Client-ID {client_id}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        debug!(status, bytes = body.len(), "response received");

        serde_json::from_str(&body).map_err(|e| FetchError::decode(url, status, e))
    }
}
