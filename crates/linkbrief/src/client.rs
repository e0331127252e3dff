//! Fetch entry points for LinkBrief
//!
//! This module provides the options shared by all fetchers and a convenience
//! function for one-off fetches. The actual transport is implemented by
//! fetchers in the [`fetchers`](crate::fetchers) module.

use crate::error::FetchError;
use crate::fetchers::{Fetcher, HttpFetcher};
use crate::DEFAULT_USER_AGENT;
use std::time::Duration;

/// Default whole-request timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on body bytes read from a page (5 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Options applied to every fetch
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Whole-request timeout (connect, headers and body)
    pub timeout: Duration,
    /// User-Agent sent to origin servers
    pub user_agent: String,
    /// Bytes of body kept; the rest is dropped
    pub max_body_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FetchOptions {
    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the body byte cap
    pub fn max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Fetch a page with default options
///
/// For repeated fetches keep an [`HttpFetcher`] around instead, so the
/// connection pool is reused.
pub async fn fetch_html(url: &str) -> Result<String, FetchError> {
    fetch_html_with_options(url, &FetchOptions::default()).await
}

/// Fetch a page with custom options
pub async fn fetch_html_with_options(
    url: &str,
    options: &FetchOptions,
) -> Result<String, FetchError> {
    HttpFetcher::new()?.fetch(url, options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.user_agent, "Mozilla/5.0 (compatible; KeeeeepBot/1.0)");
        assert_eq!(options.max_body_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_fetch_options_builder() {
        let options = FetchOptions::default()
            .timeout(Duration::from_millis(250))
            .user_agent("TestAgent/1.0")
            .max_body_bytes(1024);
        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.user_agent, "TestAgent/1.0");
        assert_eq!(options.max_body_bytes, 1024);
    }

    #[tokio::test]
    async fn test_fetch_invalid_scheme() {
        let result = fetch_html("ftp://example.com").await;
        assert!(matches!(result, Err(FetchError::InvalidUrlScheme)));
    }
}
