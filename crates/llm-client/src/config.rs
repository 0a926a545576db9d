//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    /// Upper bound for one generation call; `None` waits indefinitely.
    fn timeout(&self) -> Option<Duration>;
}

/// LLM config loaded from environment variables (or filled in from a config file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: Option<u64>,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn timeout(&self) -> Option<Duration> {
        self.llm_timeout_secs.map(Duration::from_secs)
    }
}

impl EnvLlmConfig {
    /// Load from `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `AI_MODEL` (or `MODEL`), `AI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let llm_model = env::var("AI_MODEL")
            .or_else(|_| env::var("MODEL"))
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_timeout_secs = match env::var("AI_TIMEOUT_SECS") {
            Ok(s) => Some(
                s.trim()
                    .parse()
                    .with_context(|| format!("AI_TIMEOUT_SECS is not a number: {}", s))?,
            ),
            Err(_) => None,
        };
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_timeout_secs,
        })
    }
}
