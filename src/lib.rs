//! Subgrab Core Library
//!
//! Crawls paginated subreddit listings, keeps posts whose preview is a large
//! landscape image, resolves image-host links into direct image URLs, and
//! downloads them into a directory, skipping files that already exist.
//!
//! # Architecture
//!
//! - [`api`] - authenticated JSON fetcher and response shapes
//! - [`resolver`] - link classification, album expansion, per-page link map
//! - [`filter`] - size/aspect policy
//! - [`download`] - image downloader with redirects, retries, and a deadline
//! - [`crawl`] - page crawler and subreddit x page driver
//! - [`config`] - config file loading and validation

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod crawl;
pub mod download;
pub mod filter;
pub mod interrupt;
pub mod resolver;
mod user_agent;

// Re-export commonly used types
pub use api::{ApiClient, FetchError};
pub use config::{ConfigError, CrawlConfig, FileConfig, RunOptions, SortMode, load_file_config};
pub use crawl::{CrawlContext, CrawlError, RunStats};
pub use download::{DownloadError, DownloadOutcome, ImageDownloader};
pub use filter::is_acceptable;
pub use interrupt::Interrupt;
pub use resolver::{LinkKind, LinkResolver, ResolveError, ResolvedImage, ResolvedLinks, classify};
