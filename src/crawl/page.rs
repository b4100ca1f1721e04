//! One listing page: fetch, filter, resolve, download.

use tracing::{debug, info, instrument, trace, warn};

use super::{CrawlContext, CrawlError, RunStats};
use crate::api::Listing;
use crate::download::DownloadOutcome;
use crate::filter::is_acceptable;
use crate::resolver::{Resolution, ResolvedLinks};

impl CrawlContext {
    /// Crawls one listing page and returns the cursor for the next one.
    ///
    /// The cursor is the id of the last post that carried preview metadata,
    /// even if that post was then rejected by the size filter. `None` means
    /// no such post existed and pagination for this subreddit is over.
    ///
    /// Album lookup and download failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::Fetch`] when the page itself cannot be fetched
    /// and [`CrawlError::Interrupted`] when the user interrupts, including
    /// while a listing or album request is in flight.
    #[instrument(skip(self, stats), fields(subreddit = %subreddit))]
    pub async fn crawl_page(
        &self,
        page_url: &str,
        subreddit: &str,
        stats: &mut RunStats,
    ) -> Result<Option<String>, CrawlError> {
        let listing = self
            .interruptible(self.api.fetch_json::<Listing>(page_url))
            .await??;
        stats.pages_crawled += 1;

        let (links, cursor) = self.resolve_page(listing, subreddit).await?;

        if self.config.dry_run {
            info!(images = links.len(), "dry run, skipping downloads");
            for image in links.iter() {
                info!(id = %image.id, url = %image.url, "would download");
            }
            return Ok(cursor);
        }

        self.download_all(links, stats).await?;
        Ok(cursor)
    }

    async fn resolve_page(
        &self,
        listing: Listing,
        subreddit: &str,
    ) -> Result<(ResolvedLinks, Option<String>), CrawlError> {
        let mut links = ResolvedLinks::new();
        let mut cursor = None;

        let posts = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .filter(|post| !post.is_self_post(subreddit));

        for post in posts {
            if self.interrupt.is_triggered() {
                return Err(CrawlError::Interrupted);
            }

            let Some((width, height)) = post.preview_size() else {
                debug!(url = %post.url, "no size found, ignoring link");
                continue;
            };
            cursor = Some(post.id.clone());

            if !is_acceptable(width, height) {
                trace!(url = %post.url, width, height, "image too small or not landscape");
                continue;
            }

            match self.interruptible(self.resolver.resolve(&post)).await? {
                Ok(Resolution::Images(images)) => links.extend(images),
                Ok(Resolution::Unsupported) => {
                    debug!(url = %post.url, "skipping unhandled case");
                }
                Err(error) => {
                    warn!(url = %post.url, error = %error, "dropping post after album lookup failure");
                }
            }
        }

        Ok((links, cursor))
    }

    async fn download_all(
        &self,
        links: ResolvedLinks,
        stats: &mut RunStats,
    ) -> Result<(), CrawlError> {
        for image in links {
            if self.interrupt.is_triggered() {
                return Err(CrawlError::Interrupted);
            }

            let Some(dest) = self.destination(&image.id) else {
                warn!(id = %image.id, url = %image.url, "identifier is not a plain file name, skipping");
                continue;
            };
            let exists = tokio::fs::metadata(&dest)
                .await
                .is_ok_and(|meta| meta.is_file());
            if exists {
                debug!(url = %image.url, "skipping, already downloaded");
                stats.images_skipped += 1;
                continue;
            }

            debug!(url = %image.url, "downloading");
            match self
                .downloader
                .download(&image.url, &dest, &self.interrupt)
                .await
            {
                Ok(DownloadOutcome::Saved { .. }) => stats.images_downloaded += 1,
                Ok(DownloadOutcome::RetriesExhausted { .. }) => {}
                Err(error) if error.is_interrupted() => return Err(CrawlError::Interrupted),
                Err(error) => warn!(url = %image.url, error = %error, "download failed"),
            }
        }
        Ok(())
    }
}
