//! Error types for the relay core.
//!
//! [`IrcError`] is the top-level error. End-of-stream is not an error: the read loop simply returns.

use thiserror::Error;

/// Top-level error for the relay (wire format, transport, config, IO).
#[derive(Error, Debug)]
pub enum IrcError {
    /// The raw line had no command token after prefix removal.
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`IrcError`].
pub type Result<T> = std::result::Result<T, IrcError>;
