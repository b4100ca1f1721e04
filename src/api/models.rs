//! Wire shapes for the listing and album APIs.
//!
//! Only the fields the crawler reads are modelled; everything else in the
//! responses is ignored by serde.

use serde::Deserialize;

/// Top-level listing page: `{"data": {"children": [...]}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingChild {
    pub data: Post,
}

/// A single listing entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    /// Post identifier, without the `t3_` type tag.
    pub id: String,
    /// Link target of the post.
    #[serde(default)]
    pub url: String,
    /// Domain of the link target; `self.<subreddit>` for text posts.
    #[serde(default)]
    pub domain: String,
    /// Preview renditions, absent for posts the site could not preview.
    #[serde(default)]
    pub preview: Option<Preview>,
}

impl Post {
    /// Returns `(width, height)` of the first preview's source rendition.
    #[must_use]
    pub fn preview_size(&self) -> Option<(u32, u32)> {
        self.preview
            .as_ref()
            .and_then(|preview| preview.images.first())
            .map(|image| (image.source.width, image.source.height))
    }

    /// True when the post links back into the subreddit itself.
    #[must_use]
    pub fn is_self_post(&self, subreddit: &str) -> bool {
        self.domain.contains(subreddit)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewImage {
    pub source: PreviewSource,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PreviewSource {
    pub width: u32,
    pub height: u32,
}

/// Album lookup response: `{"data": {"images": [...]}}` or `{"data": {"error": ...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumResponse {
    pub data: AlbumData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumData {
    /// Host error, either a plain message or a structured object.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

impl AlbumData {
    /// Returns the host's error message, if the lookup failed.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|error| match error {
            serde_json::Value::String(message) => message.clone(),
            serde_json::Value::Object(fields) => fields
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| error.to_string(), str::to_string),
            other => other.to_string(),
        })
    }
}

/// One member of an album.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumImage {
    pub id: String,
    pub link: String,
}
