//! Registration complete (`001`) → JOIN every configured channel; our own JOIN echo → ACTIVE.

use async_trait::async_trait;
use irc_core::{Bot, Handler, HandlerResponse, ParsedMessage, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::session::SessionState;

/// Numeric reply the server sends once registration is complete.
pub const RPL_WELCOME: &str = "001";

pub struct RegistrationHandler {
    bot: Arc<dyn Bot>,
    state: Arc<RwLock<SessionState>>,
    nickname: String,
    channels: Vec<String>,
}

impl RegistrationHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        state: Arc<RwLock<SessionState>>,
        nickname: String,
        channels: Vec<String>,
    ) -> Self {
        Self {
            bot,
            state,
            nickname,
            channels,
        }
    }

    async fn join_channels(&self) -> Result<HandlerResponse> {
        for channel in &self.channels {
            self.bot.send_command("JOIN", &[channel.as_str()]).await?;
        }
        let next = if self.channels.is_empty() {
            SessionState::Active
        } else {
            SessionState::Joined
        };
        *self.state.write().await = next;
        info!(channels = ?self.channels, state = %next, "Registration complete");
        Ok(HandlerResponse::Stop)
    }

    async fn on_join(&self, message: &ParsedMessage) -> Result<HandlerResponse> {
        let own = message
            .nick()
            .map(|nick| nick.eq_ignore_ascii_case(&self.nickname))
            .unwrap_or(false);
        if !own {
            return Ok(HandlerResponse::Continue);
        }
        let mut state = self.state.write().await;
        if *state == SessionState::Joined {
            *state = SessionState::Active;
        }
        let current = *state;
        info!(channel = message.param(0).unwrap_or("-"), state = %current, "Joined channel");
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for RegistrationHandler {
    async fn handle(&self, message: &ParsedMessage) -> Result<HandlerResponse> {
        match message.command.as_str() {
            RPL_WELCOME => self.join_channels().await,
            "JOIN" => self.on_join(message).await,
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
