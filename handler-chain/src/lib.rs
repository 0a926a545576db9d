//! # Handler chain
//!
//! Runs an ordered list of handlers for each parsed protocol line. Every handler's `before` runs
//! first (any `false` stops the chain); then `handle` runs in order until one returns Stop or
//! Reply; then every `after` runs in reverse order with the final response.

use irc_core::{Handler, HandlerResponse, ParsedMessage, Result};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ordered chain of handlers; the first handler that returns Stop or Reply ends the handle phase.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler (runs in order; first Stop/Reply ends handler phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs before → handle → after (reverse). Returns the first Stop or Reply, or Continue.
    #[instrument(skip(self, message), fields(command = %message.command))]
    pub async fn handle(&self, message: &ParsedMessage) -> Result<HandlerResponse> {
        for handler in &self.handlers {
            if !handler.before(message).await? {
                debug!(
                    handler = %std::any::type_name_of_val(handler.as_ref()),
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            debug!(handler = %handler_name, response = ?response, "step: handler done");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(message, &final_response).await?;
        }

        Ok(final_response)
    }
}

// Integration tests live in tests/handler_chain_test.rs
