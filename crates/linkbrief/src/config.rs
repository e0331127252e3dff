//! Configuration file support
//!
//! Every section and field is optional; an empty file yields the defaults.
//! The provider API key is deliberately not read from here.

use crate::client::{FetchOptions, DEFAULT_MAX_BODY_BYTES};
use crate::llm::{OpenAiConfig, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::pipeline::FetchFailurePolicy;
use crate::summarize::{
    SummarizerOptions, DEFAULT_MAX_TOKENS, DEFAULT_SUMMARY_LANGUAGE, DEFAULT_TEMPERATURE,
    MAX_PROMPT_CONTENT_CHARS,
};
use crate::DEFAULT_USER_AGENT;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub fetch: FetchConfig,
    pub summarizer: SummarizerConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
    pub max_body_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FetchConfig {
    pub fn options(&self) -> FetchOptions {
        FetchOptions::default()
            .timeout(Duration::from_millis(self.timeout_ms))
            .user_agent(self.user_agent.clone())
            .max_body_bytes(self.max_body_bytes)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummarizerConfig {
    pub base_url: String,
    pub model: String,
    pub language: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub content_limit: usize,
    pub timeout_ms: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            language: DEFAULT_SUMMARY_LANGUAGE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            content_limit: MAX_PROMPT_CONTENT_CHARS,
            timeout_ms: 30_000,
        }
    }
}

impl SummarizerConfig {
    /// Provider settings without an API key
    pub fn openai_config(&self) -> OpenAiConfig {
        OpenAiConfig::default()
            .base_url(self.base_url.clone())
            .model(self.model.clone())
            .timeout(Duration::from_millis(self.timeout_ms))
    }

    pub fn options(&self) -> SummarizerOptions {
        SummarizerOptions {
            language: self.language.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            content_limit: self.content_limit,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub on_fetch_failure: FetchFailurePolicy,
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "fetch.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.summarizer.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "summarizer.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.summarizer.content_limit == 0 {
            return Err(ConfigError::Invalid(
                "summarizer.content_limit must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.summarizer.temperature) {
            return Err(ConfigError::Invalid(
                "summarizer.temperature must be between 0 and 2".to_string(),
            ));
        }
        if self.summarizer.language.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "summarizer.language must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
