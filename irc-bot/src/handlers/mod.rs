//! Session handlers, in chain order: logging, keepalive, error notices, registration, chat.

mod error_notice;
mod keepalive;
mod logging;
mod privmsg;
mod registration;

pub use error_notice::ErrorNoticeHandler;
pub use keepalive::KeepaliveHandler;
pub use logging::LoggingHandler;
pub use privmsg::PrivmsgHandler;
pub use registration::{RegistrationHandler, RPL_WELCOME};

use conversation::SharedConversation;
use handler_chain::HandlerChain;
use irc_core::Bot;
use llm_client::LlmClient;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::BotConfig;
use crate::session::SessionState;

/// Builds the dispatcher chain. Keepalive is the first handler that acts on a line, so a `PING`
/// is answered before anything else.
pub fn build_handler_chain(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    backend: Arc<dyn LlmClient>,
    conversation: SharedConversation,
    state: Arc<RwLock<SessionState>>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(KeepaliveHandler::new(bot.clone(), state.clone())))
        .add_handler(Arc::new(ErrorNoticeHandler))
        .add_handler(Arc::new(RegistrationHandler::new(
            bot.clone(),
            state,
            config.irc.nickname.clone(),
            config.irc.channels.clone(),
        )))
        .add_handler(Arc::new(PrivmsgHandler::new(
            bot,
            backend,
            conversation,
            config.replies.clone(),
            config.irc.nickname.clone(),
        )))
}
