//! Bot abstraction for sending protocol lines.
//!
//! [`Bot`] is transport-agnostic; [`LineWriter`] implements it over any tokio `AsyncWrite`.

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::debug;

use crate::codec::build_command_line;
use crate::error::Result;

/// Abstraction for sending lines to the server. Implementations map to a transport (e.g. a TCP/TLS stream).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends one line; the implementation appends the protocol line terminator.
    async fn send_line(&self, line: &str) -> Result<()>;

    /// Builds and sends a command line (see [`build_command_line`]).
    async fn send_command(&self, command: &str, params: &[&str]) -> Result<()> {
        let line = build_command_line(command, params);
        self.send_line(&line).await
    }

    /// Sends a `PRIVMSG` to a channel or nick.
    async fn send_message(&self, target: &str, text: &str) -> Result<()> {
        self.send_command("PRIVMSG", &[target, text]).await
    }
}

/// Writes CRLF-terminated lines to the wrapped writer; flushes after every line.
pub struct LineWriter<W> {
    writer: Mutex<W>,
}

impl<W> LineWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the wrapped writer (e.g. for tests inspecting written bytes).
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> Bot for LineWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_line(&self, line: &str) -> Result<()> {
        debug!(line = %line, "->");
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\r\n").await?;
        writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_line_writer_appends_crlf() {
        let bot = LineWriter::new(Vec::new());
        bot.send_line("NICK bot").await.unwrap();
        bot.send_message("#chan", "hello there").await.unwrap();
        let written = String::from_utf8(bot.into_inner()).unwrap();
        assert_eq!(written, "NICK bot\r\nPRIVMSG #chan :hello there\r\n");
    }

    #[tokio::test]
    async fn test_send_command_builds_line() {
        let bot = LineWriter::new(Vec::new());
        bot.send_command("PONG", &["abc123"]).await.unwrap();
        assert_eq!(bot.into_inner(), b"PONG abc123\r\n".to_vec());
    }
}
