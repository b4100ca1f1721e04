//! Shared User-Agent string for listing, album, and image requests.
//!
//! Single source for project URL and UA format so every request the crawler
//! makes identifies the tool the same way.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/subgrab";

/// User-Agent sent with every listing, album, and image request.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("subgrab/{version} (wallpaper-crawler; +{PROJECT_UA_URL})")
}
