//! Imgur URL shapes and album expansion.

use tracing::{instrument, trace};

use super::{ResolveError, ResolvedImage};
use crate::api::{AlbumResponse, ApiClient};

/// Default base URL of the album API.
pub const DEFAULT_ALBUM_API_BASE: &str = "https://api.imgur.com/3";

/// Number of characters in an album hash.
const ALBUM_HASH_LEN: usize = 5;

const ALBUM_PREFIXES: [&str; 2] = ["http://imgur.com/a/", "https://imgur.com/a/"];

const IMAGE_PREFIXES: [&str; 4] = [
    "http://imgur.com/",
    "https://imgur.com/",
    "http://i.imgur.com/",
    "https://i.imgur.com/",
];

/// Extracts the album hash from an album URL.
///
/// Strips the known album prefixes, then takes the first five characters after
/// the last remaining `/a/`. Returns `None` when nothing is left.
#[must_use]
pub fn album_hash(url: &str) -> Option<String> {
    let mut rest = url;
    for prefix in ALBUM_PREFIXES {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
        }
    }
    if let Some(idx) = rest.rfind("/a/") {
        rest = &rest[idx + "/a/".len()..];
    }
    let hash: String = rest.chars().take(ALBUM_HASH_LEN).collect();
    (!hash.is_empty()).then_some(hash)
}

/// Resolves a single hosted image URL into its identifier and direct link.
///
/// The identifier is whatever remains after removing the known host
/// prefixes; the direct link is the URL with `.jpg` appended.
#[must_use]
pub fn hosted_image(url: &str) -> ResolvedImage {
    let mut id = url;
    for prefix in IMAGE_PREFIXES {
        if let Some(stripped) = id.strip_prefix(prefix) {
            id = stripped;
        }
    }
    ResolvedImage::new(id, format!("{url}.jpg"))
}

/// Expands album hashes into their member images via the album API.
#[derive(Debug, Clone)]
pub struct AlbumResolver {
    api: ApiClient,
    base_url: String,
}

impl AlbumResolver {
    /// Creates a resolver against `base_url` (see [`DEFAULT_ALBUM_API_BASE`]).
    #[must_use]
    pub fn new(api: ApiClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api, base_url }
    }

    /// Builds the lookup URL for `hash`.
    #[must_use]
    pub fn album_url(&self, hash: &str) -> String {
        format!("{}/album/{hash}", self.base_url)
    }

    /// Fetches the album and returns every member image, in album order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Fetch`] when the lookup fails and
    /// [`ResolveError::Album`] when the host reports an error; no partial
    /// member list is returned in either case.
    #[instrument(level = "debug", skip(self))]
    pub async fn expand(&self, hash: &str) -> Result<Vec<ResolvedImage>, ResolveError> {
        let response: AlbumResponse = self.api.fetch_json(&self.album_url(hash)).await?;
        if let Some(message) = response.data.error_message() {
            return Err(ResolveError::album(hash, &message));
        }

        Ok(response
            .data
            .images
            .into_iter()
            .map(|image| {
                trace!(id = %image.id, "found album image");
                ResolvedImage::new(image.id, image.link)
            })
            .collect())
    }
}
