//! # IRC relay application
//!
//! Wires irc-core, handler-chain, conversation and llm-client: loads config from env or a JSON
//! file, connects over TCP or TLS, registers, and relays chat messages to the text-generation
//! backend.

pub mod cli;
pub mod command;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod session;
pub mod transport;

pub use cli::{load_config, Cli, Commands};
pub use command::{classify, Action, ReplyTarget, RESET_COMMAND, SYSTEM_COMMAND};
pub use config::{BotConfig, IrcConfig, ReplyConfig};
pub use handlers::build_handler_chain;
pub use runner::{run_bot, run_bot_with_backend, run_session};
pub use session::{Session, SessionState};
pub use transport::{connect, Connection};
