//! Core types: origin, parsed message, handler response, and Handler trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sender identity of an inbound message, from a `nick[!ident][@host]` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub nick: String,
    pub ident: Option<String>,
    pub host: Option<String>,
}

impl Origin {
    /// Parses a prefix token (without the leading `:`).
    ///
    /// `nick!ident@host`, `nick!ident`, `nick@host` and bare `nick` are accepted.
    pub fn parse(token: &str) -> Self {
        if let Some((nick, rest)) = token.split_once('!') {
            let (ident, host) = match rest.split_once('@') {
                Some((ident, host)) => (ident.to_string(), Some(host.to_string())),
                None => (rest.to_string(), None),
            };
            return Self {
                nick: nick.to_string(),
                ident: Some(ident),
                host,
            };
        }
        if let Some((nick, host)) = token.split_once('@') {
            return Self {
                nick: nick.to_string(),
                ident: None,
                host: Some(host.to_string()),
            };
        }
        Self {
            nick: token.to_string(),
            ident: None,
            host: None,
        }
    }
}

/// One protocol line in structured form. Built only by [`crate::parse_line`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub prefix: Option<Origin>,
    /// Upper-cased command or three-digit numeric.
    pub command: String,
    /// Middle params in order; at most the last one is a trailing param with spaces.
    pub params: Vec<String>,
}

impl ParsedMessage {
    /// Returns the numeric value when the command is a numeric reply (e.g. `001`, `433`).
    pub fn numeric(&self) -> Option<u16> {
        if !self.command.is_empty() && self.command.bytes().all(|b| b.is_ascii_digit()) {
            self.command.parse().ok()
        } else {
            None
        }
    }

    /// Returns the numeric when it is a protocol error notice (>= 400).
    pub fn error_code(&self) -> Option<u16> {
        self.numeric().filter(|code| *code >= 400)
    }

    /// Sender nickname, if the line carried a prefix.
    pub fn nick(&self) -> Option<&str> {
        self.prefix.as_ref().map(|p| p.nick.as_str())
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text (e.g. the generated reply).
    Reply(String),
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &ParsedMessage) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &ParsedMessage) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &ParsedMessage,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
