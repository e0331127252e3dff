//! Scrape-and-summarize pipeline
//!
//! Composes fetch, extract and summarize in-process. Each call runs its
//! stages strictly in sequence and shares nothing mutable with other calls,
//! so one [`Pipeline`] can serve any number of concurrent requests.

use crate::client::FetchOptions;
use crate::config::Config;
use crate::error::{PipelineError, ValidationError};
use crate::extract::{Extractor, HtmlExtractor};
use crate::fetchers::{Fetcher, HttpFetcher};
use crate::llm::{LlmClient, OpenAiClient, OpenAiConfig};
use crate::summarize::{fallback_summary, Summarizer, SummarizerOptions, SUMMARY_PLACEHOLDER};
use crate::types::{BriefResult, WebMetadata};
use crate::urls::normalize_url;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// What to do when the page cannot be fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    /// Fail the request with a fetch error
    #[default]
    Abort,
    /// Answer with minimal metadata (`title = url`, everything else empty)
    Degrade,
}

impl std::str::FromStr for FetchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(FetchFailurePolicy::Abort),
            "degrade" => Ok(FetchFailurePolicy::Degrade),
            _ => Err("Invalid fetch failure policy: must be abort or degrade".to_string()),
        }
    }
}

/// Builder for configuring a [`Pipeline`]
#[derive(Default)]
pub struct PipelineBuilder {
    fetcher: Option<Arc<dyn Fetcher>>,
    extractor: Option<Arc<dyn Extractor>>,
    llm: Option<Arc<dyn LlmClient>>,
    openai: OpenAiConfig,
    summarizer_options: SummarizerOptions,
    fetch_options: FetchOptions,
    on_fetch_failure: FetchFailurePolicy,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration file
    ///
    /// The API key is not part of the file; set it with [`Self::api_key`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            openai: config.summarizer.openai_config(),
            summarizer_options: config.summarizer.options(),
            fetch_options: config.fetch.options(),
            on_fetch_failure: config.pipeline.on_fetch_failure,
            ..Self::default()
        }
    }

    /// Replace the page fetcher
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Replace the metadata extractor
    pub fn extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Replace the LLM provider (the OpenAI settings are then ignored)
    pub fn llm_client(mut self, llm: Arc<dyn LlmClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Settings for the default OpenAI provider
    pub fn openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = config;
        self
    }

    /// Set the provider API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai.api_key = Some(api_key.into());
        self
    }

    pub fn summarizer_options(mut self, options: SummarizerOptions) -> Self {
        self.summarizer_options = options;
        self
    }

    pub fn fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    pub fn on_fetch_failure(mut self, policy: FetchFailurePolicy) -> Self {
        self.on_fetch_failure = policy;
        self
    }

    /// Build the pipeline
    ///
    /// Only the default HTTP clients can fail to build; injected stages are
    /// used as-is.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let llm: Arc<dyn LlmClient> = match self.llm {
            Some(llm) => llm,
            None => Arc::new(OpenAiClient::new(self.openai)?),
        };
        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new()?),
        };
        let extractor: Arc<dyn Extractor> = match self.extractor {
            Some(extractor) => extractor,
            None => Arc::new(HtmlExtractor::new()),
        };
        Ok(Pipeline {
            fetcher,
            extractor,
            summarizer: Summarizer::with_options(llm, self.summarizer_options),
            fetch_options: self.fetch_options,
            on_fetch_failure: self.on_fetch_failure,
        })
    }
}

/// Configured fetch, extract and summarize chain
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    summarizer: Summarizer,
    fetch_options: FetchOptions,
    on_fetch_failure: FetchFailurePolicy,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn on_fetch_failure(&self) -> FetchFailurePolicy {
        self.on_fetch_failure
    }

    /// Fetch `url` and extract its metadata
    ///
    /// `url` may omit its scheme. Under [`FetchFailurePolicy::Degrade`] a
    /// failed fetch yields [`WebMetadata::minimal`] instead of an error.
    pub async fn scrape(&self, url: &str) -> Result<WebMetadata, PipelineError> {
        let url = normalize_url(url)?;

        let html = match self.fetcher.fetch(&url, &self.fetch_options).await {
            Ok(html) => html,
            Err(err) => {
                return match self.on_fetch_failure {
                    FetchFailurePolicy::Abort => {
                        warn!(url = %url, fetcher = self.fetcher.name(), error = %err, "Fetch failed");
                        Err(err.into())
                    }
                    FetchFailurePolicy::Degrade => {
                        warn!(url = %url, error = %err, "Fetch failed, returning minimal metadata");
                        Ok(WebMetadata::minimal(url))
                    }
                };
            }
        };

        let metadata = self.extractor.extract(&html, &url);
        debug!(
            url = %url,
            extractor = self.extractor.name(),
            content_chars = metadata.content.chars().count(),
            "Extracted metadata"
        );
        Ok(metadata)
    }

    /// Summarize caller-supplied content
    pub async fn summarize(
        &self,
        content: &str,
        title: Option<&str>,
        url: Option<&str>,
    ) -> Result<String, PipelineError> {
        if content.trim().is_empty() {
            return Err(ValidationError::MissingContent.into());
        }
        Ok(self.summarizer.summarize(content, title, url).await?)
    }

    /// Scrape `url` and attach a summary
    ///
    /// Summarization failure is not fatal: the summary falls back to the
    /// page description, then to [`SUMMARY_PLACEHOLDER`].
    pub async fn scrape_and_summarize(&self, url: &str) -> Result<BriefResult, PipelineError> {
        let metadata = self.scrape(url).await?;
        let summary = self.summary_for(&metadata).await;
        Ok(BriefResult::from_metadata(metadata, summary))
    }

    async fn summary_for(&self, metadata: &WebMetadata) -> String {
        let source = if metadata.content.trim().is_empty() {
            metadata.description.as_str()
        } else {
            metadata.content.as_str()
        };
        if source.trim().is_empty() {
            debug!(url = %metadata.url, "Nothing to summarize");
            return SUMMARY_PLACEHOLDER.to_string();
        }

        match self
            .summarizer
            .summarize(source, Some(&metadata.title), Some(&metadata.url))
            .await
        {
            Ok(summary) => summary,
            Err(err) => {
                warn!(url = %metadata.url, error = %err, "Summarization failed, using fallback");
                fallback_summary(&metadata.description)
            }
        }
    }
}
