//! # Conversation
//!
//! The running turn history sent to the text-generation backend.
//!
//! ## Shape
//!
//! - Index 0 is always the current **System** turn; it is only ever replaced by [`ConversationState::reset`].
//! - **User** and **Assistant** turns are appended in arrival order.
//! - No turn is deleted individually; reset replaces the whole sequence.
//!
//! ## Sharing
//!
//! One [`SharedConversation`] serves the whole session, whichever channel or nick is talking to
//! the bot. It is a `tokio::sync::Mutex`, so a caller can hold it across the backend call and no
//! reset or other append interleaves with an exchange.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Role of a turn, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// One role-tagged unit of conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Default system instruction when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Ordered turn history; index 0 is always the System turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    turns: Vec<Turn>,
}

impl ConversationState {
    /// Starts a conversation holding only the given system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_prompt)],
        }
    }

    /// Replaces the entire history with a single System turn.
    pub fn reset(&mut self, system_prompt: impl Into<String>) {
        self.turns = vec![Turn::system(system_prompt)];
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    /// Appends the backend's reply; call only after a successful generation.
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::assistant(text));
    }

    /// Read-only view of all turns, in order.
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    /// The current system prompt (content of turn 0).
    pub fn system_prompt(&self) -> &str {
        self.turns.first().map(|t| t.content.as_str()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: the System turn is never removed.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Renders the turns as a JSON array (`[{"role":"system","content":"..."}]`).
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.turns).unwrap_or_else(|_| format!("{:?}", self.turns))
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

/// Session-wide conversation behind a mutex. Clones share the same state.
pub type SharedConversation = Arc<Mutex<ConversationState>>;

/// Creates a [`SharedConversation`] seeded with `system_prompt`.
pub fn shared(system_prompt: impl Into<String>) -> SharedConversation {
    Arc::new(Mutex::new(ConversationState::new(system_prompt)))
}
