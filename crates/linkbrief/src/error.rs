//! Error types for LinkBrief

use thiserror::Error;

/// Input rejected before any network call is made
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// URL is missing or blank
    #[error("URL is required")]
    MissingUrl,

    /// URL could not be parsed even after normalization
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    /// Content to summarize is missing or blank
    #[error("Content is required")]
    MissingContent,
}

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request failed with status code {0}")]
    HttpStatus(u16),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectError(err)
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}

/// Errors that can occur while asking the LLM provider for a summary
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Provider is not configured (missing API key and similar)
    #[error("LLM provider is not configured: {0}")]
    Config(String),

    /// Failed to build the provider's HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Nothing to summarize
    #[error("Content is required")]
    EmptyContent,

    /// Network-level failure talking to the provider
    #[error("LLM request failed: {0}")]
    Request(String),

    /// Provider answered with an error status
    #[error("LLM provider returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider answered 2xx but the body was not a completion
    #[error("Malformed LLM response: {0}")]
    InvalidResponse(String),
}

impl SummarizeError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SummarizeError::Request("request timed out".to_string())
        } else {
            SummarizeError::Request(err.to_string())
        }
    }
}

/// Stage-tagged error returned by the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Summarize failed: {0}")]
    Summarize(#[from] SummarizeError),
}

impl PipelineError {
    /// Name of the stage that produced the error
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "validate",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Summarize(_) => "summarize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::MissingUrl.to_string(), "URL is required");
        assert_eq!(
            ValidationError::MissingContent.to_string(),
            "Content is required"
        );
        assert_eq!(
            FetchError::InvalidUrlScheme.to_string(),
            "Invalid URL: must start with http:// or https://"
        );
        assert_eq!(
            FetchError::HttpStatus(404).to_string(),
            "Request failed with status code 404"
        );
        assert_eq!(
            SummarizeError::Api {
                status: 401,
                message: "bad key".to_string()
            }
            .to_string(),
            "LLM provider returned 401: bad key"
        );
    }

    #[test]
    fn test_pipeline_error_stage() {
        let err: PipelineError = ValidationError::MissingUrl.into();
        assert_eq!(err.stage(), "validate");
        assert_eq!(err.to_string(), "URL is required");

        let err: PipelineError = FetchError::Timeout.into();
        assert_eq!(err.stage(), "fetch");
        assert_eq!(err.to_string(), "Fetch failed: Request timed out");

        let err: PipelineError = SummarizeError::Config("missing API key".to_string()).into();
        assert_eq!(err.stage(), "summarize");
    }

    #[tokio::test]
    async fn test_client_build_errors_keep_their_source() {
        use std::error::Error as _;

        let reqwest_err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        let err: PipelineError = FetchError::ClientBuildError(reqwest_err).into();
        assert_eq!(err.stage(), "fetch");
        assert_eq!(err.to_string(), "Fetch failed: Failed to create HTTP client");

        let reqwest_err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        let err = SummarizeError::ClientBuildError(reqwest_err);
        assert!(err.source().is_some());
        let err: PipelineError = err.into();
        assert_eq!(err.stage(), "summarize");
    }
}
