//! One connection's lifetime: registration, then the read loop feeding every line to the handler
//! chain until end-of-stream.

use conversation::SharedConversation;
use handler_chain::HandlerChain;
use irc_core::{decode_line, parse_line, Bot, HandlerResponse, IrcError, ParsedMessage, Result};
use llm_client::LlmClient;
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::config::BotConfig;
use crate::handlers::build_handler_chain;

/// Connection progress. `Active` is the steady state for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Registered,
    Joined,
    Active,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Connecting => "CONNECTING",
            SessionState::Registered => "REGISTERED",
            SessionState::Joined => "JOINED",
            SessionState::Active => "ACTIVE",
        };
        f.write_str(name)
    }
}

/// Session dispatcher over one transport.
pub struct Session {
    bot: Arc<dyn Bot>,
    chain: HandlerChain,
    state: Arc<RwLock<SessionState>>,
    nickname: String,
    ident: String,
    realname: String,
}

impl Session {
    pub fn new(
        config: &BotConfig,
        bot: Arc<dyn Bot>,
        backend: Arc<dyn LlmClient>,
        conversation: SharedConversation,
    ) -> Self {
        let state = Arc::new(RwLock::new(SessionState::Connecting));
        let chain = build_handler_chain(config, bot.clone(), backend, conversation, state.clone());
        Self {
            bot,
            chain,
            state,
            nickname: config.irc.nickname.clone(),
            ident: config.irc.ident.clone(),
            realname: config.irc.realname.clone(),
        }
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// Sends `NICK` and `USER`, then moves to `Registered`.
    pub async fn register(&self) -> Result<()> {
        self.bot.send_line(&format!("NICK {}", self.nickname)).await?;
        self.bot
            .send_line(&format!("USER {} * * :{}", self.ident, self.realname))
            .await?;
        *self.state.write().await = SessionState::Registered;
        info!(nick = %self.nickname, "Registration sent");
        Ok(())
    }

    /// Runs one parsed line through the handler chain.
    pub async fn dispatch(&self, message: &ParsedMessage) -> Result<HandlerResponse> {
        self.chain.handle(message).await
    }

    /// Decodes, parses and dispatches one raw line. Blank lines are skipped; malformed lines are
    /// logged and skipped.
    pub async fn handle_line(&self, raw: &[u8]) -> Result<()> {
        let decoded = decode_line(raw);
        let line = decoded.trim();
        if line.is_empty() {
            return Ok(());
        }
        let message = match parse_line(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, line = %line, "Skipping malformed line");
                return Ok(());
            }
        };
        self.dispatch(&message).await?;
        Ok(())
    }

    /// Reads lines until end-of-stream. End-of-stream returns `Ok(())`; a read error ends the
    /// session with that error. Errors while handling a single line are logged and the loop goes on.
    #[instrument(skip(self, reader), fields(nick = %self.nickname))]
    pub async fn run<R>(&self, mut reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let mut buf = Vec::with_capacity(512);
        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).await.map_err(|e| {
                error!(error = %e, "Read failed");
                IrcError::Io(e)
            })?;
            if read == 0 {
                let state = self.state().await;
                info!(state = %state, "Connection closed by server");
                return Ok(());
            }
            if let Err(e) = self.handle_line(&buf).await {
                error!(error = %e, "Failed to handle line");
            }
        }
    }
}
