//! Logs every inbound line in before() and the chain's outcome in after(); always continues.

use async_trait::async_trait;
use irc_core::{Handler, HandlerResponse, ParsedMessage, Result};
use tracing::debug;

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    async fn before(&self, message: &ParsedMessage) -> Result<bool> {
        debug!(
            nick = message.nick().unwrap_or("-"),
            command = %message.command,
            params = ?message.params,
            "<-"
        );
        Ok(true)
    }

    async fn after(&self, message: &ParsedMessage, response: &HandlerResponse) -> Result<()> {
        debug!(command = %message.command, response = ?response, "Processed line");
        Ok(())
    }
}
