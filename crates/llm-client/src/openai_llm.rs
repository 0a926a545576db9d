//! OpenAI-compatible [`LlmClient`]: sends the conversation as-is (the system turn comes from the conversation).

use anyhow::Result;
use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use async_trait::async_trait;
use conversation::Turn;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use super::config::{LlmConfig, DEFAULT_MODEL};
use super::{turn_to_openai, LlmClient};

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 characters or fewer become "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars.iter().take(7).collect();
    let tail: String = chars.iter().skip(chars.len() - 4).collect();
    format!("{}***{}", head, tail)
}

/// Chat-completions client for OpenAI or any compatible endpoint.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    timeout: Option<Duration>,
    /// Masked once at construction; only used for logging.
    masked_key: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        let masked_key = mask_token(&api_key);
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            masked_key,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let masked_key = mask_token(&api_key);
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            masked_key,
        }
    }

    /// Builds a client from any [`LlmConfig`] (base URL, model, timeout).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_timeout(config.timeout())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat_completion(&self, turns: &[Turn]) -> Result<String> {
        let messages = turns
            .iter()
            .map(turn_to_openai)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No response from OpenAI"),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, turns), fields(model = %self.model, turns = turns.len()))]
    async fn generate(&self, turns: &[Turn]) -> Result<String> {
        info!(api_key = %self.masked_key, "OpenAI chat_completion request");
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.chat_completion(turns))
                .await
                .map_err(|_| anyhow::anyhow!("LLM request timed out after {:?}", limit))?,
            None => self.chat_completion(turns).await,
        }
    }
}
