//! BotConfig: IrcConfig + ReplyConfig + LLM config + log file.
//!
//! Use [`BotConfig::load`] for env-based loading or [`BotConfig::from_json_file`] for a JSON
//! config file. Call [`BotConfig::validate`] before connecting.

use anyhow::{Context, Result};
use llm_client::{EnvLlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::Deserialize;
use std::env;
use std::path::Path;

use super::irc::default_port;
use super::{IrcConfig, ReplyConfig};

pub const DEFAULT_LOG_FILE: &str = "logs/gptirc.log";

/// Full relay config.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub irc: IrcConfig,
    pub replies: ReplyConfig,
    pub llm: EnvLlmConfig,
    /// LOG_FILE
    pub log_file: String,
}

impl BotConfig {
    /// Load full config from environment variables. If `nick` is provided it overrides IRC_NICKNAME.
    pub fn load(nick: Option<String>) -> Result<Self> {
        let irc = IrcConfig::load(nick)?;
        let replies = ReplyConfig::load()?;
        let llm = EnvLlmConfig::from_env()?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Ok(Self {
            irc,
            replies,
            llm,
            log_file,
        })
    }

    /// Load from a JSON file. A missing `api_key` falls back to OPENAI_API_KEY.
    pub fn from_json_file(path: &Path, nick: Option<String>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_json_str(&raw, nick).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn from_json_str(raw: &str, nick: Option<String>) -> Result<Self> {
        let file: FileConfig = serde_json::from_str(raw)?;
        file.into_bot_config(nick)
    }

    /// Validate config. Call after load to fail fast before connecting.
    pub fn validate(&self) -> Result<()> {
        self.irc.validate()?;
        self.replies.validate()?;
        if self.llm.openai_api_key.trim().is_empty() {
            anyhow::bail!("OpenAI API key must not be empty");
        }
        Ok(())
    }

    pub fn nickname(&self) -> &str {
        &self.irc.nickname
    }
    pub fn log_file(&self) -> &str {
        &self.log_file
    }
}

/// On-disk JSON layout.
#[derive(Debug, Deserialize)]
struct FileConfig {
    server: String,
    port: Option<u16>,
    #[serde(default = "default_true", alias = "tls")]
    ssl: bool,
    #[serde(default)]
    allow_self_signed: bool,
    nickname: String,
    ident: Option<String>,
    realname: Option<String>,
    #[serde(default)]
    channels: Vec<String>,
    system_message: Option<String>,
    #[serde(alias = "wating_message")]
    waiting_message: Option<String>,
    reset_message: Option<String>,
    system_changed_message: Option<String>,
    fallback_message: Option<String>,
    chunk_limit: Option<usize>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    log_file: Option<String>,
}

fn default_true() -> bool {
    true
}

impl FileConfig {
    fn into_bot_config(self, nick: Option<String>) -> Result<BotConfig> {
        let nickname = nick.unwrap_or(self.nickname);
        let irc = IrcConfig {
            server: self.server,
            port: self.port.unwrap_or_else(|| default_port(self.ssl)),
            tls: self.ssl,
            allow_self_signed: self.allow_self_signed,
            ident: self.ident.unwrap_or_else(|| nickname.clone()),
            realname: self.realname.unwrap_or_else(|| nickname.clone()),
            nickname,
            channels: self.channels,
        };

        let defaults = ReplyConfig::default();
        let replies = ReplyConfig {
            system_prompt: self.system_message.unwrap_or(defaults.system_prompt),
            waiting_message: self.waiting_message.unwrap_or(defaults.waiting_message),
            reset_message: self.reset_message.unwrap_or(defaults.reset_message),
            system_changed_message: self
                .system_changed_message
                .unwrap_or(defaults.system_changed_message),
            fallback_message: self.fallback_message.unwrap_or(defaults.fallback_message),
            chunk_limit: self.chunk_limit.unwrap_or(defaults.chunk_limit),
        };

        let openai_api_key = match self.api_key {
            Some(key) => key,
            None => env::var("OPENAI_API_KEY")
                .context("api_key missing from config file and OPENAI_API_KEY not set")?,
        };
        let llm = EnvLlmConfig {
            openai_api_key,
            openai_base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            llm_model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: self.timeout_secs,
        };

        Ok(BotConfig {
            irc,
            replies,
            llm,
            log_file: self.log_file.unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        })
    }
}
