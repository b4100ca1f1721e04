//! Image download with bounded retries, manual redirects, and a deadline.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use subgrab_core::Interrupt;
//! use subgrab_core::download::{DownloadOutcome, ImageDownloader};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = ImageDownloader::new()?;
//! let outcome = downloader
//!     .download("https://i.redd.it/abc.jpg", Path::new("images/abc.jpg"), &Interrupt::new())
//!     .await?;
//! if let DownloadOutcome::Saved { bytes, .. } = outcome {
//!     println!("saved {bytes} bytes");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;

pub use client::{DownloadOutcome, ImageDownloader};
pub use constants::{DOWNLOAD_TIMEOUT, MAX_ATTEMPTS};
pub use error::DownloadError;
