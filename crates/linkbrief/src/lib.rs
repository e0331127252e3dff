//! LinkBrief - link preview and AI summary service
//!
//! This crate turns a URL into a preview card: it fetches the page, extracts
//! its title, description, preview image, favicon and visible body text, and
//! asks an LLM for a short summary (Thai by default).
//!
//! ## Stages
//!
//! - [`Fetcher`] - retrieves raw HTML ([`HttpFetcher`] over reqwest)
//! - [`Extractor`] - parses HTML into [`WebMetadata`] ([`HtmlExtractor`])
//! - [`Summarizer`] - builds the prompt and calls an [`LlmClient`]
//!   ([`OpenAiClient`] for any OpenAI-compatible endpoint)
//!
//! [`Pipeline`] composes the three; [`server`] exposes it over HTTP.
//!
//! ```no_run
//! # async fn run() -> Result<(), linkbrief::PipelineError> {
//! let pipeline = linkbrief::Pipeline::builder().api_key("sk-...").build()?;
//! let brief = pipeline.scrape_and_summarize("example.com").await?;
//! println!("{}: {}", brief.title, brief.summary);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
mod error;
pub mod extract;
pub mod fetchers;
pub mod llm;
mod pipeline;
pub mod server;
pub mod summarize;
mod text;
mod types;
pub mod urls;

pub use client::{fetch_html, fetch_html_with_options, FetchOptions};
pub use config::{Config, ConfigError};
pub use error::{FetchError, PipelineError, SummarizeError, ValidationError};
pub use extract::{Extractor, HtmlExtractor, MAX_CONTENT_CHARS};
pub use fetchers::{Fetcher, HttpFetcher};
pub use llm::{LlmClient, OpenAiClient, OpenAiConfig};
pub use pipeline::{FetchFailurePolicy, Pipeline, PipelineBuilder};
pub use summarize::{Summarizer, SummarizerOptions, SUMMARY_PLACEHOLDER};
pub use types::{BriefResult, ScrapeRequest, SummarizeRequest, SummaryData, WebMetadata};
pub use urls::normalize_url;

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; KeeeeepBot/1.0)";
