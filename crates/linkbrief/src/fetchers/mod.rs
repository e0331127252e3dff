//! Page fetchers
//!
//! Design: a fetcher turns an absolute URL into raw HTML. The pipeline only
//! sees the [`Fetcher`] trait, so tests and embedders can plug in their own
//! transport. [`HttpFetcher`] is the reqwest-backed implementation.

mod http;

pub use http::HttpFetcher;

use crate::client::FetchOptions;
use crate::error::FetchError;
use async_trait::async_trait;

/// Trait for page fetchers
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Unique identifier for this fetcher (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Fetch the raw body of `url`
    ///
    /// `url` must already carry an http(s) scheme. One outbound request per
    /// call: no retry, no caching. Non-success statuses are errors.
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError>;
}
