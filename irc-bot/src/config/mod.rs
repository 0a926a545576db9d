//! Relay configuration: IrcConfig (server, TLS, identity, channels) + ReplyConfig (texts, chunk limit)
//! + LLM config, from env or a JSON file.

mod bot_config;
mod irc;
mod replies;


pub use bot_config::{BotConfig, DEFAULT_LOG_FILE};
pub use irc::{IrcConfig, DEFAULT_PLAIN_PORT, DEFAULT_TLS_PORT};
pub use replies::{
    ReplyConfig, DEFAULT_FALLBACK_MESSAGE, DEFAULT_RESET_MESSAGE, DEFAULT_SYSTEM_CHANGED_MESSAGE,
    DEFAULT_WAITING_MESSAGE,
};
