//! Wire codec: raw protocol lines to [`ParsedMessage`] and back.
//!
//! Parsing follows the classic `[:prefix] COMMAND param* [:trailing]` shape. Building marks the
//! last parameter as trailing when it needs it. The transport appends the CRLF terminator.

use std::borrow::Cow;

use crate::error::{IrcError, Result};
use crate::types::{Origin, ParsedMessage};

/// Splits off the first whitespace-delimited token; the remainder keeps its leading whitespace.
fn split_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => s.split_at(idx),
        None => (s, ""),
    }
}

/// Parses one protocol line (already stripped of its terminator).
///
/// Fails with [`IrcError::MalformedMessage`] when no command token remains after the prefix.
pub fn parse_line(line: &str) -> Result<ParsedMessage> {
    let mut rest = line.trim_start();
    let mut prefix = None;

    if let Some(stripped) = rest.strip_prefix(':') {
        let (token, remainder) = split_token(stripped);
        prefix = Some(Origin::parse(token));
        rest = remainder.trim_start();
    }

    let (command, remainder) = split_token(rest);
    if command.is_empty() {
        return Err(IrcError::MalformedMessage(line.to_string()));
    }
    rest = remainder;

    let mut params = Vec::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing.to_string());
            break;
        }
        let (param, remainder) = split_token(rest);
        params.push(param.to_string());
        rest = remainder;
    }

    Ok(ParsedMessage {
        prefix,
        command: command.to_uppercase(),
        params,
    })
}

/// Builds an outgoing command line: `COMMAND p1 p2 :last param`.
///
/// The last parameter gets a `:` marker when it contains a space, is empty, or itself starts
/// with `:`. Embedded CR/LF are replaced with spaces so the result is always a single line.
pub fn build_command_line<S: AsRef<str>>(command: &str, params: &[S]) -> String {
    let mut parts: Vec<Cow<'_, str>> = Vec::with_capacity(params.len() + 1);
    parts.push(Cow::Borrowed(command));

    let last_index = params.len().saturating_sub(1);
    for (idx, param) in params.iter().enumerate() {
        let param = param.as_ref();
        let param = if param.contains(['\r', '\n']) {
            Cow::Owned(param.replace(['\r', '\n'], " "))
        } else {
            Cow::Borrowed(param)
        };
        let needs_marker =
            idx == last_index && (param.contains(' ') || param.is_empty() || param.starts_with(':'));
        if needs_marker {
            parts.push(Cow::Owned(format!(":{}", param)));
        } else {
            parts.push(param);
        }
    }

    parts.join(" ")
}

/// Decodes raw transport bytes: UTF-8 first, Latin-1 when that fails. Never fails.
pub fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
