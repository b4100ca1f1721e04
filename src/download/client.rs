//! Image downloader with manual redirect handling and a hard deadline.
//!
//! Each download makes up to [`MAX_ATTEMPTS`] GET requests with automatic
//! redirects disabled:
//!
//! - `200` streams the body to disk and stops
//! - `301`/`302` switches to the `Location` target for the next attempt
//! - anything else is logged and the same URL is tried again
//!
//! The whole sequence runs under one wall-clock timeout and races the user
//! interrupt; when either fires, the request is dropped and the partial file
//! is removed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode, redirect};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, DOWNLOAD_TIMEOUT, MAX_ATTEMPTS, PARTIAL_SUFFIX};
use super::error::DownloadError;
use crate::interrupt::Interrupt;
use crate::user_agent;

/// Result of a download that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The image was written to disk.
    Saved {
        /// Final file path.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
        /// Requests made, including redirect hops.
        attempts: u32,
    },
    /// Every attempt was used without a `200`; nothing was written.
    RetriesExhausted {
        /// Requests made.
        attempts: u32,
        /// URL of the last request.
        last_url: String,
    },
}

/// Downloads single images to explicit destination paths.
///
/// Created once and reused so connections are pooled across images.
#[derive(Debug, Clone)]
pub struct ImageDownloader {
    client: Client,
    max_attempts: u32,
    timeout: Duration,
}

impl ImageDownloader {
    /// Creates a downloader with the default attempt budget and deadline.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] when the HTTP client cannot be built.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_limits(MAX_ATTEMPTS, DOWNLOAD_TIMEOUT)
    }

    /// Creates a downloader with an explicit attempt budget and deadline.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] when the HTTP client cannot be built.
    pub fn with_limits(max_attempts: u32, timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(redirect::Policy::none())
            .user_agent(user_agent::default_user_agent())
            .gzip(true)
            .build()
            .map_err(|source| DownloadError::Client { source })?;
        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
            timeout,
        })
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Downloads `url` into `dest`.
    ///
    /// The body is streamed into a `.part` sibling and renamed into place only
    /// once complete, so `dest` either holds a whole image or does not exist.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::Timeout`] when the deadline passes
    /// - [`DownloadError::Interrupted`] when `interrupt` fires
    /// - [`DownloadError::Network`] / [`DownloadError::Io`] for request or disk failures
    #[instrument(skip(self, interrupt), fields(url = %url, dest = %dest.display()))]
    pub async fn download(
        &self,
        url: &str,
        dest: &Path,
        interrupt: &Interrupt,
    ) -> Result<DownloadOutcome, DownloadError> {
        let partial = partial_path(dest);

        let result = tokio::select! {
            biased;
            () = interrupt.triggered() => Err(DownloadError::interrupted(url)),
            timed = tokio::time::timeout(self.timeout, self.follow(url, dest, &partial)) => {
                timed.unwrap_or_else(|_| Err(DownloadError::timeout(url, self.timeout)))
            }
        };

        if result.is_err() {
            debug!(path = %partial.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&partial).await;
        }
        result
    }

    /// The attempt loop, without deadline or interrupt handling.
    async fn follow(
        &self,
        url: &str,
        dest: &Path,
        partial: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let mut current = url.to_string();

        for attempt in 1..=self.max_attempts {
            let response = self
                .client
                .get(&current)
                .send()
                .await
                .map_err(|e| DownloadError::network(&current, e))?;

            match response.status() {
                StatusCode::OK => {
                    let bytes = stream_to_file(response, &current, partial).await?;
                    tokio::fs::rename(partial, dest)
                        .await
                        .map_err(|e| DownloadError::io(dest, e))?;
                    info!(path = %dest.display(), bytes, attempts = attempt, "download complete");
                    return Ok(DownloadOutcome::Saved {
                        path: dest.to_path_buf(),
                        bytes,
                        attempts: attempt,
                    });
                }
                StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => {
                    match redirect_target(&current, &response) {
                        Some(next) => {
                            debug!(from = %current, to = %next, attempt, "following redirect");
                            current = next;
                        }
                        None => warn!(
                            url = %current,
                            status = response.status().as_u16(),
                            "redirect without usable Location header"
                        ),
                    }
                }
                status => {
                    warn!(url = %current, status = status.as_u16(), attempt, "got unexpected HTTP code");
                }
            }
        }

        warn!(url = %current, attempts = self.max_attempts, "maximum retries exceeded, stopping");
        Ok(DownloadOutcome::RetriesExhausted {
            attempts: self.max_attempts,
            last_url: current,
        })
    }
}

/// Resolves the `Location` header of `response` against `current`.
fn redirect_target(current: &str, response: &reqwest::Response) -> Option<String> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?.trim();
    if location.is_empty() {
        return None;
    }
    match Url::parse(current).and_then(|base| base.join(location)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(_) => Some(location.to_string()),
    }
}

/// `dest` with [`PARTIAL_SUFFIX`] appended to the file name.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Streams the response body into `path`, returning bytes written.
async fn stream_to_file(
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, DownloadError> {
    let file = File::create(path)
        .await
        .map_err(|e| DownloadError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(path, e))?;

    Ok(bytes_written)
}
