//! Link classification and resolution for listing posts.
//!
//! A post's URL is classified by a small, priority-ordered rule list and then
//! resolved into zero or more [`ResolvedImage`]s:
//!
//! 1. URL path ends in `.jpg` / `.png` - [`LinkKind::Direct`], keyed by post id
//! 2. contains `imgur` and `/a/` - [`LinkKind::Album`], expanded via the album API
//! 3. contains `imgur` - [`LinkKind::HostedImage`], keyed by the image hash
//! 4. anything else - [`LinkKind::Unsupported`]
//!
//! # Architecture
//!
//! - [`classify`] - pure rule evaluation
//! - [`LinkResolver`] - classification plus album expansion
//! - [`ResolvedLinks`] - ordered, last-write-wins map built per page
//! - [`ResolveError`] - album lookup failures

mod error;
mod imgur;
mod links;

pub use error::ResolveError;
pub use imgur::{AlbumResolver, DEFAULT_ALBUM_API_BASE, album_hash, hosted_image};
pub use links::{ResolvedImage, ResolvedLinks};

use tracing::{debug, instrument};
use url::Url;

use crate::api::{ApiClient, Post};

/// Direct image extensions, matched case-sensitively.
const DIRECT_IMAGE_SUFFIXES: [&str; 2] = [".jpg", ".png"];

/// Classification of a post URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Directly downloadable image.
    Direct,
    /// Multi-image album identified by its hash.
    Album {
        /// Five-character album hash.
        hash: String,
    },
    /// Single image on the hosting service.
    HostedImage(ResolvedImage),
    /// Not one of the recognized shapes.
    Unsupported,
}

/// Classifies `url` using the first matching rule.
#[must_use]
pub fn classify(url: &str) -> LinkKind {
    if is_direct_image(url) {
        return LinkKind::Direct;
    }
    if url.contains("imgur") {
        if url.contains("/a/") {
            return album_hash(url).map_or(LinkKind::Unsupported, |hash| LinkKind::Album { hash });
        }
        return LinkKind::HostedImage(hosted_image(url));
    }
    LinkKind::Unsupported
}

/// True when the URL's path ends in a direct image extension.
///
/// Falls back to the raw string when the URL does not parse.
fn is_direct_image(url: &str) -> bool {
    let parsed = Url::parse(url).ok();
    let path = parsed.as_ref().map_or(url, Url::path);
    DIRECT_IMAGE_SUFFIXES
        .iter()
        .any(|suffix| path.ends_with(suffix))
}

/// Outcome of resolving one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The post maps to these images (an empty album yields an empty list).
    Images(Vec<ResolvedImage>),
    /// The post's link is not a recognized image shape.
    Unsupported,
}

/// Resolves posts into direct image links.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    albums: AlbumResolver,
}

impl LinkResolver {
    /// Creates a resolver whose album lookups go to `album_api_base`.
    #[must_use]
    pub fn new(api: ApiClient, album_api_base: impl Into<String>) -> Self {
        Self {
            albums: AlbumResolver::new(api, album_api_base),
        }
    }

    /// Resolves a post that already passed the size filter.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when an album lookup fails; the caller drops
    /// the whole post in that case.
    #[instrument(level = "debug", skip(self, post), fields(post_id = %post.id, url = %post.url))]
    pub async fn resolve(&self, post: &Post) -> Result<Resolution, ResolveError> {
        match classify(&post.url) {
            LinkKind::Direct => {
                debug!("found simple image");
                Ok(Resolution::Images(vec![ResolvedImage::new(
                    post.id.clone(),
                    post.url.clone(),
                )]))
            }
            LinkKind::Album { hash } => {
                debug!(%hash, "found album");
                self.albums.expand(&hash).await.map(Resolution::Images)
            }
            LinkKind::HostedImage(image) => {
                debug!(id = %image.id, "found hosted image");
                Ok(Resolution::Images(vec![image]))
            }
            LinkKind::Unsupported => Ok(Resolution::Unsupported),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_direct_jpg_and_png() {
        assert_eq!(classify("https://i.redd.it/abc.jpg"), LinkKind::Direct);
        assert_eq!(classify("https://example.com/path/wall.png"), LinkKind::Direct);
    }

    #[test]
    fn test_classify_direct_is_case_sensitive() {
        assert_eq!(classify("https://example.com/WALL.JPG"), LinkKind::Unsupported);
        assert_eq!(classify("https://example.com/wall.jpeg"), LinkKind::Unsupported);
    }

    #[test]
    fn test_classify_direct_ignores_query_string() {
        assert_eq!(classify("https://example.com/wall.jpg?width=640"), LinkKind::Direct);
    }

    #[test]
    fn test_classify_direct_wins_over_album() {
        assert_eq!(classify("https://imgur.com/a/ABCDE/cover.png"), LinkKind::Direct);
    }

    #[test]
    fn test_classify_album() {
        assert_eq!(
            classify("https://imgur.com/a/ABCDEFGH"),
            LinkKind::Album {
                hash: "ABCDE".to_string()
            }
        );
    }

    #[test]
    fn test_classify_hosted_image() {
        assert_eq!(
            classify("https://i.imgur.com/xyz123"),
            LinkKind::HostedImage(ResolvedImage::new("xyz123", "https://i.imgur.com/xyz123.jpg"))
        );
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(classify("https://flickr.com/photos/123"), LinkKind::Unsupported);
        assert_eq!(classify("https://www.reddit.com/gallery/abc"), LinkKind::Unsupported);
    }

    #[tokio::test]
    async fn test_resolve_direct_uses_post_id() {
        let resolver = LinkResolver::new(ApiClient::new(None).unwrap(), DEFAULT_ALBUM_API_BASE);
        let post: Post = serde_json::from_str(
            r#"{"id": "p1", "url": "https://i.redd.it/zzz.jpg", "domain": "i.redd.it"}"#,
        )
        .unwrap();
        let resolution = resolver.resolve(&post).await.unwrap();
        assert_eq!(
            resolution,
            Resolution::Images(vec![ResolvedImage::new("p1", "https://i.redd.it/zzz.jpg")])
        );
    }

    #[tokio::test]
    async fn test_resolve_unsupported_makes_no_request() {
        let resolver = LinkResolver::new(ApiClient::new(None).unwrap(), "http://127.0.0.1:1");
        let post: Post = serde_json::from_str(
            r#"{"id": "p2", "url": "https://gfycat.com/thing", "domain": "gfycat.com"}"#,
        )
        .unwrap();
        assert_eq!(resolver.resolve(&post).await.unwrap(), Resolution::Unsupported);
    }
}
