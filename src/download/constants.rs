//! Constants for the image downloader.

use std::time::Duration;

/// HTTP connect timeout for image requests.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Attempts per image, counting every redirect hop and every failed status.
pub const MAX_ATTEMPTS: u32 = 10;

/// Wall-clock budget for one image download, redirects included.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Suffix of the temporary file a body is streamed into before rename.
pub const PARTIAL_SUFFIX: &str = ".part";
