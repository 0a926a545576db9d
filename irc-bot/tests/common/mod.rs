//! Shared mocks for irc-bot integration tests.
//!
//! [`MockBot`] records every outbound line; [`MockLlmClient`] returns scripted replies or failures
//! and records the turns it was called with. Neither touches the network.

#![allow(dead_code)]

use async_trait::async_trait;
use conversation::{shared, SharedConversation, Turn};
use irc_bot::{BotConfig, IrcConfig, ReplyConfig, Session};
use irc_core::{Bot, Result};
use llm_client::{EnvLlmConfig, LlmClient};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Records lines instead of writing them to a transport.
#[derive(Default)]
pub struct MockBot {
    lines: Mutex<Vec<String>>,
}

impl MockBot {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Drains recorded lines so the next assertion only sees new output.
    pub fn take_lines(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_line(&self, line: &str) -> Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// Scripted backend: pops one outcome per call; an empty script answers "Hello there".
#[derive(Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: Mutex<Vec<Vec<Turn>>>,
}

impl MockLlmClient {
    pub fn replying(reply: &str) -> Self {
        let client = Self::default();
        client.push_reply(reply);
        client
    }

    pub fn failing(error: &str) -> Self {
        let client = Self::default();
        client.push_failure(error);
        client
    }

    pub fn push_reply(&self, reply: &str) {
        self.script.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub fn push_failure(&self, error: &str) {
        self.script.lock().unwrap().push_back(Err(error.to_string()));
    }

    /// Turn sequences passed to `generate`, one entry per call.
    pub fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, turns: &[Turn]) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(turns.to_vec());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(error)) => Err(anyhow::anyhow!(error)),
            None => Ok("Hello there".to_string()),
        }
    }
}

/// Config for a bot named `bot` in the given channels; no env access.
pub fn test_config(channels: &[&str]) -> BotConfig {
    BotConfig {
        irc: IrcConfig {
            server: "irc.test".to_string(),
            port: 6667,
            tls: false,
            allow_self_signed: false,
            nickname: "bot".to_string(),
            ident: "bot".to_string(),
            realname: "Bot Relay".to_string(),
            channels: channels.iter().map(|c| c.to_string()).collect(),
        },
        replies: ReplyConfig::default(),
        llm: EnvLlmConfig {
            openai_api_key: "sk-test-key-123456".to_string(),
            openai_base_url: "http://localhost:1/v1".to_string(),
            llm_model: "test-model".to_string(),
            llm_timeout_secs: None,
        },
        log_file: "logs/test.log".to_string(),
    }
}

/// Session wired to mocks, with handles to inspect them.
pub struct Harness {
    pub session: Session,
    pub bot: Arc<MockBot>,
    pub backend: Arc<MockLlmClient>,
    pub conversation: SharedConversation,
}

impl Harness {
    pub fn new(config: &BotConfig, backend: MockLlmClient) -> Self {
        let bot = Arc::new(MockBot::default());
        let backend = Arc::new(backend);
        let conversation = shared(config.replies.system_prompt.as_str());
        let session = Session::new(config, bot.clone(), backend.clone(), conversation.clone());
        Self {
            session,
            bot,
            backend,
            conversation,
        }
    }

    /// Registers, then drops the NICK/USER lines from the record.
    pub async fn registered(config: &BotConfig, backend: MockLlmClient) -> Self {
        let harness = Self::new(config, backend);
        harness.session.register().await.unwrap();
        harness.bot.take_lines();
        harness
    }

    pub async fn line(&self, raw: &str) {
        self.session.handle_line(raw.as_bytes()).await.unwrap();
    }

    pub async fn turn_count(&self) -> usize {
        self.conversation.lock().await.len()
    }
}
