//! Error types for link resolution.

use thiserror::Error;

use crate::api::FetchError;

/// Errors that can occur while expanding an album link.
///
/// Any of these drops every image of the originating post; the page crawler
/// logs it and moves on to the next post.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The album lookup request itself failed.
    #[error("album lookup failed: {0}")]
    Fetch(#[from] FetchError),

    /// The album host answered with an error payload.
    #[error("album {hash} could not be expanded: {message}")]
    Album {
        /// Album hash that was looked up.
        hash: String,
        /// Host-provided error message.
        message: String,
    },
}

impl ResolveError {
    /// Creates an `Album` error from the host's message.
    #[must_use]
    pub fn album(hash: &str, message: &str) -> Self {
        Self::Album {
            hash: hash.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_error_display() {
        let error = ResolveError::album("ABCDE", "Unable to find an album with the id, ABCDE");
        let msg = error.to_string();
        assert!(msg.contains("ABCDE"), "Expected hash in: {msg}");
        assert!(msg.contains("Unable to find"), "Expected host message in: {msg}");
    }
}
