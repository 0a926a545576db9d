//! Command classification for inbound chat messages.
//!
//! [`classify`] is an ordered match: the first applicable rule wins and nothing else is evaluated
//! for that message. Nick comparisons are ASCII case-insensitive.

/// Resets the conversation to the configured system prompt.
pub const RESET_COMMAND: &str = "!reset";
/// Resets the conversation with the rest of the message as the new system prompt.
pub const SYSTEM_COMMAND: &str = "!system";

/// Where a reply goes, and who it addresses when it goes to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    /// Nick (private) or channel name.
    pub target: String,
    /// Sender nick prefixed to channel replies as `nick: `.
    pub address: Option<String>,
}

impl ReplyTarget {
    pub fn private(nick: &str) -> Self {
        Self {
            target: nick.to_string(),
            address: None,
        }
    }

    pub fn channel(channel: &str, sender: Option<&str>) -> Self {
        Self {
            target: channel.to_string(),
            address: sender.map(String::from),
        }
    }

    /// Text as sent on the wire, with the `nick: ` prefix when addressing someone in a channel.
    pub fn format(&self, text: &str) -> String {
        match &self.address {
            Some(nick) => format!("{}: {}", nick, text),
            None => text.to_string(),
        }
    }
}

/// What to do with one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Ignore,
    Prompt { reply: ReplyTarget, prompt: String },
    Reset { reply: ReplyTarget },
    ChangeSystem { reply: ReplyTarget, system_prompt: String },
}

/// Classifies a `PRIVMSG` from `sender` to `target` carrying `text`.
///
/// `own_nick` is the bot's nickname. A private message without a sender cannot be answered and
/// is ignored.
pub fn classify(own_nick: &str, sender: Option<&str>, target: &str, text: &str) -> Action {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let first = match parts.first() {
        Some(first) => *first,
        None => return Action::Ignore,
    };
    let private = target.eq_ignore_ascii_case(own_nick);
    let rest = || parts[1..].join(" ");

    if private {
        let reply = match sender {
            Some(nick) => ReplyTarget::private(nick),
            None => return Action::Ignore,
        };
        return match first {
            RESET_COMMAND => Action::Reset { reply },
            SYSTEM_COMMAND => Action::ChangeSystem {
                reply,
                system_prompt: rest(),
            },
            _ => Action::Prompt {
                reply,
                prompt: parts.join(" "),
            },
        };
    }

    let reply = ReplyTarget::channel(target, sender);
    match first {
        RESET_COMMAND => Action::Reset { reply },
        SYSTEM_COMMAND => Action::ChangeSystem {
            reply,
            system_prompt: rest(),
        },
        _ if parts.len() < 2 => Action::Ignore,
        _ if is_addressed_to(first, own_nick) => Action::Prompt {
            reply,
            prompt: rest(),
        },
        _ => Action::Ignore,
    }
}

/// True when `token` is `own_nick` followed by `:`.
fn is_addressed_to(token: &str, own_nick: &str) -> bool {
    token
        .strip_suffix(':')
        .map(|nick| nick.eq_ignore_ascii_case(own_nick))
        .unwrap_or(false)
}
