//! IRC connection config: server, TLS mode, identity, channels. Loaded from env.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_TLS_PORT: u16 = 6697;
pub const DEFAULT_PLAIN_PORT: u16 = 6667;

/// Server address, TLS mode, identity, and channel list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcConfig {
    /// IRC_SERVER
    pub server: String,
    /// IRC_PORT; defaults to 6697 with TLS, 6667 without
    pub port: u16,
    /// IRC_TLS
    pub tls: bool,
    /// IRC_ALLOW_SELF_SIGNED: accept any certificate and skip hostname checks
    pub allow_self_signed: bool,
    /// IRC_NICKNAME
    pub nickname: String,
    /// IRC_IDENT (defaults to the nickname)
    pub ident: String,
    /// IRC_REALNAME (defaults to the nickname)
    pub realname: String,
    /// IRC_CHANNELS, comma-separated
    pub channels: Vec<String>,
}

/// Reads a boolean env var (`true/false/1/0/yes/no`); unset means `default`.
pub(crate) fn env_bool(key: &str, default: bool) -> Result<bool> {
    match env::var(key) {
        Ok(value) => parse_bool(&value).with_context(|| format!("{} is not a boolean: {}", key, value)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Splits a comma-separated channel list, dropping blanks.
pub(crate) fn parse_channels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

impl IrcConfig {
    /// Load from environment variables. `nick` overrides IRC_NICKNAME if provided.
    pub fn load(nick: Option<String>) -> Result<Self> {
        let server = env::var("IRC_SERVER").context("IRC_SERVER not set")?;
        let tls = env_bool("IRC_TLS", true)?;
        let allow_self_signed = env_bool("IRC_ALLOW_SELF_SIGNED", false)?;
        let port = match env::var("IRC_PORT") {
            Ok(p) => p
                .trim()
                .parse()
                .with_context(|| format!("IRC_PORT is not a port number: {}", p))?,
            Err(_) => default_port(tls),
        };
        let nickname = match nick {
            Some(n) => n,
            None => env::var("IRC_NICKNAME").context("IRC_NICKNAME not set")?,
        };
        let ident = env::var("IRC_IDENT").unwrap_or_else(|_| nickname.clone());
        let realname = env::var("IRC_REALNAME").unwrap_or_else(|_| nickname.clone());
        let channels = env::var("IRC_CHANNELS")
            .map(|c| parse_channels(&c))
            .unwrap_or_default();

        Ok(Self {
            server,
            port,
            tls,
            allow_self_signed,
            nickname,
            ident,
            realname,
            channels,
        })
    }

    /// Validate identity and channel names.
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            anyhow::bail!("IRC server must not be empty");
        }
        if self.nickname.is_empty() || self.nickname.contains(char::is_whitespace) {
            anyhow::bail!("IRC nickname must be a single non-empty word: {:?}", self.nickname);
        }
        if self.ident.is_empty() || self.ident.contains(char::is_whitespace) {
            anyhow::bail!("IRC ident must be a single non-empty word: {:?}", self.ident);
        }
        for channel in &self.channels {
            if !(channel.starts_with('#') || channel.starts_with('&'))
                || channel.contains(char::is_whitespace)
            {
                anyhow::bail!("Invalid channel name: {:?}", channel);
            }
        }
        Ok(())
    }

    /// `host:port`, for logging.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}

pub(crate) fn default_port(tls: bool) -> u16 {
    if tls {
        DEFAULT_TLS_PORT
    } else {
        DEFAULT_PLAIN_PORT
    }
}
