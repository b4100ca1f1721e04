//! Listing request URLs and their pagination state.

use url::form_urlencoded;

use crate::config::SortMode;

/// Type tag prefixed to post identifiers in `after` cursors.
pub const POST_TYPE_TAG: &str = "t3_";

/// Posts per listing page; the `count` parameter advances by this much.
pub const PAGE_SIZE: u32 = 25;

/// Pagination state for one subreddit.
///
/// Starts with the sort mode's fixed parameters and no cursor; each
/// [`advance`](Self::advance) adds the running `count` and the `after`
/// cursor for the next page.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    base_url: String,
    subreddit: String,
    sort: SortMode,
    count: u32,
    after: Option<String>,
}

impl ListingRequest {
    #[must_use]
    pub fn new(base_url: &str, subreddit: &str, sort: SortMode) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            subreddit: subreddit.to_string(),
            sort,
            count: 0,
            after: None,
        }
    }

    /// Moves to the page after the post `cursor`.
    pub fn advance(&mut self, cursor: &str) {
        self.count += PAGE_SIZE;
        self.after = Some(format!("{POST_TYPE_TAG}{cursor}"));
    }

    #[cfg(test)]
    fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Builds the request URL for the current page.
    #[must_use]
    pub fn url(&self) -> String {
        let path = format!(
            "{}/r/{}/{}.json",
            self.base_url,
            self.subreddit,
            self.sort.path_suffix()
        );

        let mut params = self.sort.base_params();
        if let Some(after) = &self.after {
            params.push(("count", self.count.to_string()));
            params.push(("after", after.clone()));
        }
        if params.is_empty() {
            return path;
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())))
            .finish();
        format!("{path}?{query}")
    }
}
