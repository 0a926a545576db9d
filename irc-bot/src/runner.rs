//! Bootstrap: validate config, init logging, build the backend, connect, and run one session.

use anyhow::{Context, Result};
use conversation::shared;
use irc_core::{init_tracing, Bot, LineWriter};
use llm_client::{mask_token, LlmClient, OpenAILlmClient};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::session::Session;
use crate::transport;

/// Main entry: validate config, init logging, build the OpenAI backend, then connect and run.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let backend = OpenAILlmClient::from_config(&config.llm);
    info!(
        model = %backend.model(),
        base_url = %config.llm.openai_base_url,
        api_key = %mask_token(&config.llm.openai_api_key),
        "Initializing relay"
    );
    run_bot_with_backend(config, Arc::new(backend)).await
}

/// Connects with `config.irc` and runs a session against the given backend.
#[instrument(skip(config, backend), fields(address = %config.irc.address()))]
pub async fn run_bot_with_backend(config: BotConfig, backend: Arc<dyn LlmClient>) -> Result<()> {
    let connection = transport::connect(&config.irc)
        .await
        .with_context(|| format!("connect to {}", config.irc.address()))?;
    let (reader, writer) = connection.split();
    run_session(&config, reader, writer, backend).await
}

/// Runs one session over an already-open reader/writer pair: register, then read until
/// end-of-stream. Used by [`run_bot_with_backend`] and by tests over in-memory pipes.
pub async fn run_session<R, W>(
    config: &BotConfig,
    reader: R,
    writer: W,
    backend: Arc<dyn LlmClient>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let bot: Arc<dyn Bot> = Arc::new(LineWriter::new(writer));
    let conversation = shared(config.replies.system_prompt.as_str());
    let session = Session::new(config, bot, backend, conversation);

    session.register().await.context("send registration")?;
    info!(nick = %config.nickname(), channels = ?config.irc.channels, "Relay started");
    session.run(reader).await?;
    info!("Session ended");
    Ok(())
}
