//! Answers `PING` with `PONG`, echoing the probe's params in order.

use async_trait::async_trait;
use irc_core::{Bot, Handler, HandlerResponse, ParsedMessage, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::session::SessionState;

pub struct KeepaliveHandler {
    bot: Arc<dyn Bot>,
    state: Arc<RwLock<SessionState>>,
}

impl KeepaliveHandler {
    pub fn new(bot: Arc<dyn Bot>, state: Arc<RwLock<SessionState>>) -> Self {
        Self { bot, state }
    }
}

#[async_trait]
impl Handler for KeepaliveHandler {
    async fn handle(&self, message: &ParsedMessage) -> Result<HandlerResponse> {
        if message.command != "PING" {
            return Ok(HandlerResponse::Continue);
        }
        if *self.state.read().await == SessionState::Connecting {
            warn!("PING before registration; not answered");
            return Ok(HandlerResponse::Stop);
        }
        let params: Vec<&str> = message.params.iter().map(String::as_str).collect();
        self.bot.send_command("PONG", &params).await?;
        debug!(params = ?message.params, "Answered keepalive probe");
        Ok(HandlerResponse::Stop)
    }
}
