//! Error types for the download module.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can end a single image download.
///
/// Everything except [`DownloadError::Interrupted`] is contained to the one
/// image; the page crawler logs it and continues with the next.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// File system error while writing the image.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The download did not finish within its wall-clock budget.
    #[error("timeout after {}s downloading {url}", after.as_secs_f32())]
    Timeout {
        /// The URL that timed out.
        url: String,
        /// Budget that was exceeded.
        after: Duration,
    },

    /// The user interrupted the run while this download was in flight.
    #[error("interrupted while downloading {url}")]
    Interrupted {
        /// The URL that was being downloaded.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build image client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            after,
        }
    }

    /// Creates an interruption error.
    pub fn interrupted(url: impl Into<String>) -> Self {
        Self::Interrupted { url: url.into() }
    }

    /// True for the cancellation variant that must abort the whole run.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}
