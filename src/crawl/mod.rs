//! Crawl orchestration: subreddits x pages -> posts -> images on disk.
//!
//! [`CrawlContext`] bundles the validated configuration with the clients and
//! the interrupt handle; it is built once and borrowed for the whole run.
//! Run statistics live in a separate [`RunStats`] owned by the caller so they
//! survive an interrupted run.

mod driver;
mod listing;
mod page;

pub use listing::{ListingRequest, PAGE_SIZE, POST_TYPE_TAG};

use std::fmt;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::api::{ApiClient, FetchError};
use crate::config::CrawlConfig;
use crate::download::{DownloadError, ImageDownloader};
use crate::interrupt::Interrupt;
use crate::resolver::LinkResolver;

/// Errors that end a page or the run.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The listing page could not be fetched or decoded.
    #[error("failed to fetch listing page: {0}")]
    Fetch(#[from] FetchError),

    /// The image downloader could not be created.
    #[error("failed to set up image downloader: {0}")]
    Downloader(#[source] DownloadError),

    /// The user interrupted the run.
    #[error("run interrupted by user")]
    Interrupted,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pages_crawled: u64,
    pub images_downloaded: u64,
    pub images_skipped: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pages crawled: {}", self.pages_crawled)?;
        writeln!(f, "images downloaded: {}", self.images_downloaded)?;
        write!(
            f,
            "images skipped: {} (because they're already downloaded)",
            self.images_skipped
        )
    }
}

/// Everything a crawl needs, constructed once per run.
#[derive(Debug, Clone)]
pub struct CrawlContext {
    config: CrawlConfig,
    api: ApiClient,
    resolver: LinkResolver,
    downloader: ImageDownloader,
    interrupt: Interrupt,
}

impl CrawlContext {
    /// Builds the API client and image downloader for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError`] when either HTTP client cannot be built.
    pub fn new(config: CrawlConfig, interrupt: Interrupt) -> Result<Self, CrawlError> {
        let downloader = ImageDownloader::new().map_err(CrawlError::Downloader)?;
        Self::with_downloader(config, downloader, interrupt)
    }

    /// Like [`new`](Self::new) but with a caller-supplied downloader.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::Fetch`] when the API client cannot be built.
    pub fn with_downloader(
        config: CrawlConfig,
        downloader: ImageDownloader,
        interrupt: Interrupt,
    ) -> Result<Self, CrawlError> {
        let api = ApiClient::new(config.client_id.clone())?;
        let resolver = LinkResolver::new(api.clone(), config.album_api_base_url.clone());
        Ok(Self {
            config,
            api,
            resolver,
            downloader,
            interrupt,
        })
    }

    #[must_use]
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// On-disk path for the image identified by `id`.
    ///
    /// Identifiers come from post URLs and album replies; `None` means `id`
    /// is not a plain file stem and would land outside the directory.
    #[must_use]
    pub fn destination(&self, id: &str) -> Option<PathBuf> {
        is_plain_stem(id).then(|| self.config.directory.join(format!("{id}.jpg")))
    }

    /// Awaits `future` unless the user interrupts first.
    async fn interruptible<F: Future>(&self, future: F) -> Result<F::Output, CrawlError> {
        tokio::select! {
            biased;
            () = self.interrupt.triggered() => Err(CrawlError::Interrupted),
            output = future => Ok(output),
        }
    }
}

/// True when `id` is a single normal path component without separators or `..`.
fn is_plain_stem(id: &str) -> bool {
    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return false;
    }
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SortMode;

    #[test]
    fn test_run_stats_summary_has_three_lines() {
        let stats = RunStats {
            pages_crawled: 4,
            images_downloaded: 7,
            images_skipped: 2,
        };
        let summary = stats.to_string();
        let lines: Vec<_> = summary.lines().collect();
        assert_eq!(
            lines,
            [
                "pages crawled: 4",
                "images downloaded: 7",
                "images skipped: 2 (because they're already downloaded)",
            ]
        );
    }

    #[test]
    fn test_destination_is_id_with_jpg_under_directory() {
        let config = CrawlConfig {
            subreddits: vec!["wallpapers".to_string()],
            sort: SortMode::TopAll,
            pages: 1,
            directory: PathBuf::from("out"),
            dry_run: false,
            client_id: None,
            listing_base_url: "http://127.0.0.1:1".to_string(),
            album_api_base_url: "http://127.0.0.1:1".to_string(),
        };
        let ctx = CrawlContext::new(config, Interrupt::new()).unwrap();
        assert_eq!(ctx.destination("abc"), Some(PathBuf::from("out/abc.jpg")));
    }

    #[test]
    fn test_plain_stem_rejects_traversal_and_separators() {
        for id in ["abc", "xyz123", "a.b", "m1"] {
            assert!(is_plain_stem(id), "{id} should be accepted");
        }
        for id in ["", ".", "..", "../x", "../../escape", "a/b", "a\\b", "/abs", "x..y"] {
            assert!(!is_plain_stem(id), "{id} should be rejected");
        }
    }
}
