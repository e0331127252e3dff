//! HTTP fetcher
//!
//! Fetches pages over HTTP/HTTPS with a per-request timeout, a crawler
//! user agent and a cap on the number of body bytes read.

use crate::client::FetchOptions;
use crate::error::FetchError;
use crate::fetchers::Fetcher;
use crate::urls::has_http_scheme;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, warn};

/// HTTP fetcher
///
/// Holds one `reqwest::Client` so connection pools are shared across
/// requests; timeout and user agent are applied per request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client
    ///
    /// Fails when the TLS backend or resolver cannot be initialised.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(FetchError::ClientBuildError)?;
        Ok(Self { client })
    }

    /// Create a fetcher around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
        if !has_http_scheme(url) {
            return Err(FetchError::InvalidUrlScheme);
        }

        let user_agent = HeaderValue::from_str(&options.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT));

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .header(
                ACCEPT,
                HeaderValue::from_static("text/html, application/xhtml+xml, */*;q=0.8"),
            )
            .timeout(options.timeout)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "Fetched page");
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = read_body_capped(response, options.max_body_bytes).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Read the response body, keeping at most `max_bytes`
async fn read_body_capped(
    response: reqwest::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(FetchError::from_reqwest)?;
        let remaining = max_bytes.saturating_sub(body.len());
        if bytes.len() > remaining {
            body.extend_from_slice(&bytes[..remaining]);
            warn!(max_bytes, "Body limit reached, dropping the rest of the page");
            break;
        }
        body.extend_from_slice(&bytes);
    }

    Ok(body)
}
