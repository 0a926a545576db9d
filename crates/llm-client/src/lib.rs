//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (conversation so far → reply text, or failure) and an
//! OpenAI-compatible implementation. Transport-agnostic; used by irc-bot's prompt handler.

use anyhow::Result;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use async_trait::async_trait;
use conversation::{Role, Turn};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use openai_llm::{mask_token, OpenAILlmClient};

/// Text-generation backend: turns a conversation history into a reply.
///
/// Any `Err` is a backend failure for that request only; callers map it to a fallback reply.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply for `turns` (system first, then user/assistant in order).
    async fn generate(&self, turns: &[Turn]) -> Result<String>;
}

/// Converts a single [`Turn`] into OpenAI API message format.
fn turn_to_openai(turn: &Turn) -> Result<ChatCompletionRequestMessage> {
    let content = turn.content.clone();
    let message: ChatCompletionRequestMessage = match turn.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(message)
}
