//! Crawl configuration: JSON file loading, sort modes, and validation.
//!
//! The file format is a small JSON object:
//!
//! ```json
//! {
//!     "clientid": "0123456789abcde",
//!     "subreddits": ["wallpapers", "earthporn"]
//! }
//! ```
//!
//! `listing_base_url` and `album_api_base_url` may also be set to point the
//! crawler at a different host.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::resolver::DEFAULT_ALBUM_API_BASE;

/// Default base URL of the listing API.
pub const DEFAULT_LISTING_BASE: &str = "https://www.reddit.com";

/// Errors that abort the run before any crawling happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON of the expected shape.
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No subreddits in the config file or on the command line.
    #[error("subreddits list missing from config")]
    MissingSubreddits,

    /// Page count below one.
    #[error("must scrape at least one page (got {pages})")]
    InvalidPages { pages: i64 },
}

/// Listing order requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    Hot,
    New,
    TopDay,
    TopWeek,
    TopMonth,
    #[default]
    TopAll,
}

impl SortMode {
    /// Path segment placed before `.json` in listing URLs.
    #[must_use]
    pub fn path_suffix(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::TopDay | Self::TopWeek | Self::TopMonth | Self::TopAll => "top",
        }
    }

    /// Time window for the top-* modes.
    #[must_use]
    pub fn time_window(self) -> Option<&'static str> {
        match self {
            Self::Hot | Self::New => None,
            Self::TopDay => Some("day"),
            Self::TopWeek => Some("week"),
            Self::TopMonth => Some("month"),
            Self::TopAll => Some("all"),
        }
    }

    /// Query parameters that stay fixed for every page.
    #[must_use]
    pub fn base_params(self) -> Vec<(&'static str, String)> {
        self.time_window()
            .map(|window| vec![("sort", "top".to_string()), ("t", window.to_string())])
            .unwrap_or_default()
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::TopDay => "top-day",
            Self::TopWeek => "top-week",
            Self::TopMonth => "top-month",
            Self::TopAll => "top-all",
        };
        f.write_str(label)
    }
}

/// Raw contents of the JSON config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// API credential sent as `Client-ID`.
    #[serde(default)]
    pub clientid: Option<String>,
    /// Subreddits to crawl, in order.
    #[serde(default)]
    pub subreddits: Option<Vec<String>>,
    /// Override for [`DEFAULT_LISTING_BASE`].
    #[serde(default)]
    pub listing_base_url: Option<String>,
    /// Override for the album API base.
    #[serde(default)]
    pub album_api_base_url: Option<String>,
}

/// Reads and parses the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Run options that come from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Subreddits given on the command line; replace the file list when non-empty.
    pub subreddits: Vec<String>,
    pub sort: SortMode,
    pub pages: i64,
    pub directory: PathBuf,
    pub dry_run: bool,
}

/// Validated, immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub subreddits: Vec<String>,
    pub sort: SortMode,
    pub pages: u32,
    pub directory: PathBuf,
    pub dry_run: bool,
    pub client_id: Option<String>,
    pub listing_base_url: String,
    pub album_api_base_url: String,
}

impl CrawlConfig {
    /// Merges file and command-line settings and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSubreddits`] when neither source names a
    /// subreddit and [`ConfigError::InvalidPages`] when `pages < 1`.
    pub fn resolve(file: FileConfig, options: RunOptions) -> Result<Self, ConfigError> {
        let subreddits: Vec<String> = if options.subreddits.is_empty() {
            file.subreddits.unwrap_or_default()
        } else {
            options.subreddits
        }
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

        if subreddits.is_empty() {
            return Err(ConfigError::MissingSubreddits);
        }

        let pages = u32::try_from(options.pages)
            .ok()
            .filter(|pages| *pages >= 1)
            .ok_or(ConfigError::InvalidPages {
                pages: options.pages,
            })?;

        let client_id = file.clientid.filter(|id| !id.trim().is_empty());
        if client_id.is_none() {
            warn!("clientid field isn't in config; requests will be unauthenticated");
        }

        Ok(Self {
            subreddits,
            sort: options.sort,
            pages,
            directory: options.directory,
            dry_run: options.dry_run,
            client_id,
            listing_base_url: file
                .listing_base_url
                .unwrap_or_else(|| DEFAULT_LISTING_BASE.to_string()),
            album_api_base_url: file
                .album_api_base_url
                .unwrap_or_else(|| DEFAULT_ALBUM_API_BASE.to_string()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options() -> RunOptions {
        RunOptions {
            subreddits: Vec::new(),
            sort: SortMode::TopAll,
            pages: 10,
            directory: PathBuf::from("images"),
            dry_run: false,
        }
    }

    fn file_with(subreddits: &[&str]) -> FileConfig {
        FileConfig {
            clientid: Some("abc".to_string()),
            subreddits: Some(subreddits.iter().map(ToString::to_string).collect()),
            ..FileConfig::default()
        }
    }

    #[test]
    fn test_resolve_uses_file_subreddits_and_defaults() {
        let config = CrawlConfig::resolve(file_with(&["wallpapers", "earthporn"]), options()).unwrap();
        assert_eq!(config.subreddits, ["wallpapers", "earthporn"]);
        assert_eq!(config.pages, 10);
        assert_eq!(config.client_id.as_deref(), Some("abc"));
        assert_eq!(config.listing_base_url, DEFAULT_LISTING_BASE);
        assert_eq!(config.album_api_base_url, DEFAULT_ALBUM_API_BASE);
    }

    #[test]
    fn test_resolve_command_line_subreddits_override_file() {
        let mut opts = options();
        opts.subreddits = vec!["spaceporn".to_string()];
        let config = CrawlConfig::resolve(file_with(&["wallpapers"]), opts).unwrap();
        assert_eq!(config.subreddits, ["spaceporn"]);
    }

    #[test]
    fn test_resolve_missing_subreddits_is_fatal() {
        let result = CrawlConfig::resolve(FileConfig::default(), options());
        assert!(matches!(result, Err(ConfigError::MissingSubreddits)));

        let result = CrawlConfig::resolve(file_with(&[" "]), options());
        assert!(matches!(result, Err(ConfigError::MissingSubreddits)));
    }

    #[test]
    fn test_resolve_zero_or_negative_pages_is_fatal() {
        for pages in [0, -3] {
            let mut opts = options();
            opts.pages = pages;
            let result = CrawlConfig::resolve(file_with(&["wallpapers"]), opts);
            assert!(
                matches!(result, Err(ConfigError::InvalidPages { pages: p }) if p == pages),
                "pages={pages} should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_missing_clientid_is_allowed() {
        let file = FileConfig {
            subreddits: Some(vec!["wallpapers".to_string()]),
            ..FileConfig::default()
        };
        let config = CrawlConfig::resolve(file, options()).unwrap();
        assert!(config.client_id.is_none());
    }

    #[test]
    fn test_load_file_config_parses_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"clientid": "abc", "subreddits": ["wallpapers"], "listing_base_url": "http://localhost:1"}"#,
        )
        .unwrap();
        let file = load_file_config(&path).unwrap();
        assert_eq!(file.clientid.as_deref(), Some("abc"));
        assert_eq!(file.subreddits.unwrap(), ["wallpapers"]);
        assert_eq!(file.listing_base_url.as_deref(), Some("http://localhost:1"));
    }

    #[test]
    fn test_load_file_config_missing_file_and_bad_json() {
        let dir = TempDir::new().unwrap();
        let missing = load_file_config(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_file_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_sort_mode_suffix_and_params() {
        assert_eq!(SortMode::Hot.path_suffix(), "hot");
        assert_eq!(SortMode::New.path_suffix(), "new");
        assert!(SortMode::New.base_params().is_empty());
        assert_eq!(SortMode::TopWeek.path_suffix(), "top");
        assert_eq!(
            SortMode::TopWeek.base_params(),
            vec![("sort", "top".to_string()), ("t", "week".to_string())]
        );
        assert_eq!(SortMode::TopAll.time_window(), Some("all"));
    }

    #[test]
    fn test_sort_mode_display_matches_cli_names() {
        assert_eq!(SortMode::TopMonth.to_string(), "top-month");
        assert_eq!(SortMode::default(), SortMode::TopAll);
    }
}
