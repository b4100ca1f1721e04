//! Subreddit x page loop.

use tracing::{info, instrument, warn};

use super::{CrawlContext, CrawlError, ListingRequest, RunStats};

impl CrawlContext {
    /// Crawls every configured subreddit, page by page, accumulating into `stats`.
    ///
    /// A subreddit stops early when a page yields no cursor or cannot be
    /// fetched; the run then moves on to the next subreddit.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::Interrupted`] when the user interrupts. Counters
    /// gathered up to that point remain in `stats`.
    #[instrument(skip_all, fields(sort = %self.config.sort, pages = self.config.pages))]
    pub async fn run(&self, stats: &mut RunStats) -> Result<(), CrawlError> {
        info!(subreddits = self.config.subreddits.len(), "starting crawl");

        for subreddit in &self.config.subreddits {
            let mut request = ListingRequest::new(
                &self.config.listing_base_url,
                subreddit,
                self.config.sort,
            );

            for page in 1..=self.config.pages {
                if self.interrupt.is_triggered() {
                    return Err(CrawlError::Interrupted);
                }

                let url = request.url();
                info!(%subreddit, page, url = %url, "crawling link");

                match self.crawl_page(&url, subreddit, stats).await {
                    Ok(Some(cursor)) => request.advance(&cursor),
                    Ok(None) => {
                        info!(%subreddit, page, "no more posts with previews; next subreddit");
                        break;
                    }
                    Err(CrawlError::Interrupted) => return Err(CrawlError::Interrupted),
                    Err(error) => {
                        warn!(%subreddit, page, error = %error, "page failed; next subreddit");
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}
