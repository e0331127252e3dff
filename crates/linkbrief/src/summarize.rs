//! AI summarization of page content
//!
//! The [`Summarizer`] owns the prompt template and the fixed sampling
//! parameters; the provider itself sits behind [`LlmClient`].

use crate::error::SummarizeError;
use crate::llm::{ChatMessage, CompletionRequest, LlmClient};
use crate::text::truncate_chars;
use std::sync::Arc;

/// Returned when the model answers with nothing, or nothing can be summarized
pub const SUMMARY_PLACEHOLDER: &str = "ไม่สามารถสรุปเนื้อหาได้";

/// Characters of content embedded in the prompt
pub const MAX_PROMPT_CONTENT_CHARS: usize = 4000;

pub const DEFAULT_SUMMARY_LANGUAGE: &str = "Thai";
pub const DEFAULT_MAX_TOKENS: u32 = 200;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Prompt and sampling settings
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizerOptions {
    /// Output language named in the prompt
    pub language: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Content is cut to this many characters before prompting
    pub content_limit: usize,
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_SUMMARY_LANGUAGE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            content_limit: MAX_PROMPT_CONTENT_CHARS,
        }
    }
}

/// Produces short summaries through an LLM provider
#[derive(Clone)]
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
    options: SummarizerOptions,
}

impl Summarizer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self::with_options(client, SummarizerOptions::default())
    }

    pub fn with_options(client: Arc<dyn LlmClient>, options: SummarizerOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &SummarizerOptions {
        &self.options
    }

    /// Build the chat request for `content`
    ///
    /// `title` wins over `url` as the page label; blank values count as absent.
    pub fn build_request(
        &self,
        content: &str,
        title: Option<&str>,
        url: Option<&str>,
    ) -> CompletionRequest {
        let language = &self.options.language;
        let label = [title, url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown");
        let content = truncate_chars(content.trim(), self.options.content_limit);

        let system = format!(
            "You are a helpful assistant that summarizes website content in {language} language. \
             Provide concise, clear summaries focusing on the main topic and key points."
        );
        let user = format!(
            "Please summarize the following website content in {language} language (2-3 sentences).\n\
             Focus on the main topic and key points:\n\n\
             Website: {label}\n\
             Content: {content}\n\n\
             Summary (in {language}):"
        );

        CompletionRequest {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: self.options.max_tokens,
            temperature: self.options.temperature,
        }
    }

    /// Summarize `content` in the configured language
    ///
    /// Blank model output is replaced by [`SUMMARY_PLACEHOLDER`]. Provider
    /// failures are returned as-is; no retry.
    pub async fn summarize(
        &self,
        content: &str,
        title: Option<&str>,
        url: Option<&str>,
    ) -> Result<String, SummarizeError> {
        if content.trim().is_empty() {
            return Err(SummarizeError::EmptyContent);
        }

        let request = self.build_request(content, title, url);
        tracing::debug!(
            model = self.client.model_name(),
            content_chars = content.chars().count(),
            "Summarizing content"
        );

        let text = self.client.complete(&request).await?;
        let text = text.trim();
        if text.is_empty() {
            tracing::warn!("Model returned an empty summary");
            return Ok(SUMMARY_PLACEHOLDER.to_string());
        }
        Ok(text.to_string())
    }
}

/// Summary used when the provider cannot be reached
pub fn fallback_summary(description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        SUMMARY_PLACEHOLDER.to_string()
    } else {
        description.to_string()
    }
}
