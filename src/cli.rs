//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use subgrab_core::SortMode;

/// Crawl subreddits and download large landscape images.
///
/// Subgrab walks listing pages, keeps posts whose preview is at least
/// 1920x1080 and wider than tall, resolves image-host links, and saves each
/// image as `<id>.jpg`, skipping files that already exist.
#[derive(Parser, Debug)]
#[command(name = "subgrab")]
#[command(author, version, about)]
pub struct Args {
    /// Subreddits to crawl (overrides the config file list)
    pub subreddits: Vec<String>,

    /// Directory to download images into
    #[arg(short = 'd', long, default_value = "images/")]
    pub directory: PathBuf,

    /// JSON config file with `clientid` and `subreddits`
    #[arg(short = 'c', long = "config", default_value = "config.json")]
    pub config_file: PathBuf,

    /// Listing order
    #[arg(short = 's', long, value_enum, default_value_t = SortMode::TopAll)]
    pub sort: SortMode,

    /// Use new posts instead of top posts (same as --sort new)
    #[arg(short = 'n', long, conflicts_with = "sort")]
    pub new: bool,

    /// Number of pages per subreddit to scrape
    #[arg(short = 'p', long, default_value_t = 10, allow_negative_numbers = true)]
    pub pages: i64,

    /// List images to download but don't download them
    #[arg(long)]
    pub dry_run: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Sort mode after applying the `--new` shorthand.
    #[must_use]
    pub fn sort_mode(&self) -> SortMode {
        if self.new { SortMode::New } else { self.sort }
    }
}
