//! Error types for listing and album API requests.

use thiserror::Error;

/// Errors that can occur while fetching a JSON document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection refused, TLS, read timeout).
    #[error("transport error fetching {url}: {source}")]
    Transport {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not valid JSON or did not match the expected shape.
    #[error("could not decode response from {url} (HTTP {status}): {source}")]
    Decode {
        /// The URL whose body failed to decode.
        url: String,
        /// HTTP status of the response, kept for context.
        status: u16,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build API client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Creates a transport error from a reqwest error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, status: u16, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            status,
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display_includes_url_and_status() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let error = FetchError::decode("https://www.reddit.com/r/pics/top.json", 503, source);
        let msg = error.to_string();
        assert!(msg.contains("https://www.reddit.com/r/pics/top.json"), "Expected URL in: {msg}");
        assert!(msg.contains("503"), "Expected status in: {msg}");
    }
}
