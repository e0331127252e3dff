//! LLM provider access
//!
//! The summarizer talks to providers only through [`LlmClient`], so the
//! provider can be swapped (or stubbed in tests) without touching prompts.

mod openai;

pub use openai::{OpenAiClient, OpenAiConfig, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};

use crate::error::SummarizeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A single chat completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Chat-completion provider
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier, for logging
    fn model_name(&self) -> &str;

    /// Run one completion and return the text of the first choice
    ///
    /// Returns an empty string when the provider answers without content.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, SummarizeError>;
}
