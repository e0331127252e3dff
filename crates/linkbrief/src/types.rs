//! Core types for LinkBrief

use serde::{Deserialize, Serialize};

/// Metadata extracted from a single page
///
/// Created fresh for every scrape request; it has no identity beyond that
/// request. Link fields are always absolute when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebMetadata {
    /// Best-effort page title (falls back to the URL)
    pub title: String,

    /// Page description, empty if the page declares none
    pub description: String,

    /// Absolute URL of a representative image
    #[serde(default)]
    pub image_url: Option<String>,

    /// Absolute URL of the site icon
    #[serde(default)]
    pub favicon_url: Option<String>,

    /// Visible body text, bounded in length
    pub content: String,

    /// Normalized source URL
    pub url: String,
}

impl WebMetadata {
    /// Minimal metadata used when the page could not be fetched
    pub fn minimal(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: url.clone(),
            url,
            ..Default::default()
        }
    }
}

/// Metadata plus AI summary, the result of scrape-and-summarize
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefResult {
    pub title: String,

    pub description: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub favicon_url: Option<String>,

    /// Summary text, never a provider error payload
    pub summary: String,

    pub url: String,
}

impl BriefResult {
    /// Combine extracted metadata with a summary, dropping the body text
    pub fn from_metadata(metadata: WebMetadata, summary: String) -> Self {
        Self {
            title: metadata.title,
            description: metadata.description,
            image_url: metadata.image_url,
            favicon_url: metadata.favicon_url,
            summary,
            url: metadata.url,
        }
    }
}

/// Body of `scrapeWebsite` and `scrapeAndSummarize` requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Page to scrape; scheme is optional
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `summarizeContent` requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// Text to summarize (required)
    #[serde(default)]
    pub content: Option<String>,

    /// Source URL, used as prompt context
    #[serde(default)]
    pub url: Option<String>,

    /// Page title, used as prompt context
    #[serde(default)]
    pub title: Option<String>,
}

/// Body of a successful `summarizeContent` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryData {
    pub summary: String,
}
