//! Page fetching.
//!
//! - `HttpFetcher` - reqwest-backed GET with a browser-like user agent
//! - `testing::MockFetcher` - canned markup for tests

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;

use crate::error::Result;

/// Retrieves the raw markup of one listing page.
///
/// Implementations make exactly one attempt per call and report every
/// failure as `ScrapeError::Transport`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

