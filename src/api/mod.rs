//! HTTP fetcher for the paged listing API and the album API.
//!
//! - [`ApiClient`] - authenticated GET + JSON decode, no retry
//! - [`FetchError`] - transport vs. decode failures
//! - [`models`] - the subset of response fields the crawler reads

mod client;
mod error;
pub mod models;

pub use client::{ApiClient, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::FetchError;
pub use models::{AlbumResponse, Listing, Post};
