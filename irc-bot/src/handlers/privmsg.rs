//! Chat messages: classifies each `PRIVMSG`, then runs the prompt, reset, or system-change action.
//!
//! A prompt sends the waiting message, calls the backend with the conversation plus the pending
//! user turn, and on success appends both turns and sends the reply in chunks. On backend failure
//! the conversation is left untouched and the fallback message is sent once. The conversation lock
//! is held from snapshot to append, so prompts and resets never interleave.

use async_trait::async_trait;
use conversation::{SharedConversation, Turn};
use irc_core::{chunk, Bot, Handler, HandlerResponse, ParsedMessage, Result};
use llm_client::LlmClient;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::command::{classify, Action, ReplyTarget};
use crate::config::ReplyConfig;

pub struct PrivmsgHandler {
    bot: Arc<dyn Bot>,
    backend: Arc<dyn LlmClient>,
    conversation: SharedConversation,
    replies: ReplyConfig,
    nickname: String,
}

impl PrivmsgHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        backend: Arc<dyn LlmClient>,
        conversation: SharedConversation,
        replies: ReplyConfig,
        nickname: String,
    ) -> Self {
        Self {
            bot,
            backend,
            conversation,
            replies,
            nickname,
        }
    }

    async fn send(&self, reply: &ReplyTarget, text: &str) -> Result<()> {
        self.bot.send_message(&reply.target, &reply.format(text)).await
    }

    /// Logs error and its cause chain.
    fn log_error_chain(e: &anyhow::Error) {
        for (i, cause) in e.chain().enumerate() {
            if i == 0 {
                error!(cause = %cause, "Backend generation failed");
            } else {
                error!(cause = %cause, "Caused by");
            }
        }
    }

    #[instrument(skip(self, prompt), fields(reply_to = %reply.target))]
    async fn respond(&self, reply: &ReplyTarget, prompt: String) -> Result<HandlerResponse> {
        self.send(reply, &self.replies.waiting_message).await?;

        let mut conversation = self.conversation.lock().await;
        let mut turns = conversation.snapshot().to_vec();
        turns.push(Turn::user(prompt.as_str()));

        let text = match self.backend.generate(&turns).await {
            Ok(text) => text,
            Err(e) => {
                drop(conversation);
                Self::log_error_chain(&e);
                self.send(reply, &self.replies.fallback_message).await?;
                return Ok(HandlerResponse::Stop);
            }
        };
        conversation.append_user(prompt);
        conversation.append_assistant(text.as_str());
        let turn_count = conversation.len();
        drop(conversation);

        let chunks = chunk(&text, self.replies.chunk_limit);
        info!(
            chunks = chunks.len(),
            reply_len = text.len(),
            turns = turn_count,
            "Sending generated reply"
        );
        for line in &chunks {
            self.send(reply, line).await?;
        }
        Ok(HandlerResponse::Reply(text))
    }

    async fn reset(&self, reply: &ReplyTarget) -> Result<HandlerResponse> {
        self.conversation
            .lock()
            .await
            .reset(self.replies.system_prompt.as_str());
        info!(reply_to = %reply.target, "Conversation reset");
        self.send(reply, &self.replies.reset_message).await?;
        Ok(HandlerResponse::Stop)
    }

    async fn change_system(
        &self,
        reply: &ReplyTarget,
        system_prompt: String,
    ) -> Result<HandlerResponse> {
        let state = {
            let mut conversation = self.conversation.lock().await;
            conversation.reset(system_prompt);
            conversation.to_json()
        };
        info!(reply_to = %reply.target, "System prompt changed");
        self.send(reply, &self.replies.system_changed_message).await?;
        self.send(reply, &state).await?;
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for PrivmsgHandler {
    async fn handle(&self, message: &ParsedMessage) -> Result<HandlerResponse> {
        if message.command != "PRIVMSG" {
            return Ok(HandlerResponse::Continue);
        }
        let (target, text) = match (message.param(0), message.param(1)) {
            (Some(target), Some(text)) => (target, text),
            _ => {
                warn!(params = ?message.params, "PRIVMSG without target and text");
                return Ok(HandlerResponse::Stop);
            }
        };

        match classify(&self.nickname, message.nick(), target, text) {
            Action::Ignore => Ok(HandlerResponse::Stop),
            Action::Prompt { reply, prompt } => self.respond(&reply, prompt).await,
            Action::Reset { reply } => self.reset(&reply).await,
            Action::ChangeSystem {
                reply,
                system_prompt,
            } => self.change_system(&reply, system_prompt).await,
        }
    }
}
