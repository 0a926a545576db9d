//! Reply texts and chunking limit. Loaded from env.

use anyhow::{Context, Result};
use conversation::DEFAULT_SYSTEM_PROMPT;
use irc_core::DEFAULT_CHUNK_LIMIT;
use std::env;

pub const DEFAULT_WAITING_MESSAGE: &str = "Please wait...";
pub const DEFAULT_RESET_MESSAGE: &str = "Conversation reset.";
pub const DEFAULT_SYSTEM_CHANGED_MESSAGE: &str = "System context changed";
pub const DEFAULT_FALLBACK_MESSAGE: &str = "We couldn't get a response for you, please try again";

/// What the bot says besides generated replies, plus the default system prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyConfig {
    /// SYSTEM_PROMPT: system turn used at start and on `!reset`
    pub system_prompt: String,
    /// WAITING_MESSAGE: sent before calling the backend
    pub waiting_message: String,
    /// RESET_MESSAGE
    pub reset_message: String,
    /// SYSTEM_CHANGED_MESSAGE
    pub system_changed_message: String,
    /// FALLBACK_MESSAGE: sent instead of a reply when the backend fails
    pub fallback_message: String,
    /// CHUNK_LIMIT: max characters per outgoing reply line
    pub chunk_limit: usize,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            waiting_message: DEFAULT_WAITING_MESSAGE.to_string(),
            reset_message: DEFAULT_RESET_MESSAGE.to_string(),
            system_changed_message: DEFAULT_SYSTEM_CHANGED_MESSAGE.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            chunk_limit: DEFAULT_CHUNK_LIMIT,
        }
    }
}

impl ReplyConfig {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let chunk_limit = match env::var("CHUNK_LIMIT") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("CHUNK_LIMIT is not a number: {}", v))?,
            Err(_) => defaults.chunk_limit,
        };
        Ok(Self {
            system_prompt: env::var("SYSTEM_PROMPT").unwrap_or(defaults.system_prompt),
            waiting_message: env::var("WAITING_MESSAGE").unwrap_or(defaults.waiting_message),
            reset_message: env::var("RESET_MESSAGE").unwrap_or(defaults.reset_message),
            system_changed_message: env::var("SYSTEM_CHANGED_MESSAGE")
                .unwrap_or(defaults.system_changed_message),
            fallback_message: env::var("FALLBACK_MESSAGE").unwrap_or(defaults.fallback_message),
            chunk_limit,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_limit == 0 {
            anyhow::bail!("CHUNK_LIMIT must be greater than zero");
        }
        Ok(())
    }
}
