//! Numeric replies >= 400 are protocol error notices: logged, never fatal.

use async_trait::async_trait;
use irc_core::{Handler, HandlerResponse, ParsedMessage, Result};
use tracing::warn;

pub struct ErrorNoticeHandler;

#[async_trait]
impl Handler for ErrorNoticeHandler {
    async fn handle(&self, message: &ParsedMessage) -> Result<HandlerResponse> {
        match message.error_code() {
            Some(code) => {
                warn!(
                    code = code,
                    server = message.nick().unwrap_or("-"),
                    params = ?message.params,
                    "Server error notice"
                );
                Ok(HandlerResponse::Stop)
            }
            None => Ok(HandlerResponse::Continue),
        }
    }
}
