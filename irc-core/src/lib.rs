//! # irc-core
//!
//! Core types and traits for the IRC relay: wire codec ([`parse_line`], [`build_command_line`],
//! [`decode_line`]), the outgoing [`chunk`]er, [`ParsedMessage`] / [`Origin`], the [`Bot`] output
//! trait, the [`Handler`] trait, and tracing initialization. Transport-agnostic; used by
//! handler-chain and irc-bot.

pub mod bot;
pub mod chunker;
pub mod codec;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, LineWriter};
pub use chunker::{chunk, DEFAULT_CHUNK_LIMIT};
pub use codec::{build_command_line, decode_line, parse_line};
pub use error::{IrcError, Result};
pub use logger::init_tracing;
pub use types::{Handler, HandlerResponse, Origin, ParsedMessage};
