//! End-to-end session tests: a scripted server feed through `run_session`, output captured from a
//! `tokio::io::duplex` pipe.

mod common;

use common::{test_config, MockLlmClient};
use irc_bot::run_session;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Runs a session over `feed` and returns everything the bot wrote, split into lines.
async fn run_feed(channels: &[&str], feed: &[u8], backend: Arc<MockLlmClient>) -> Vec<String> {
    let config = test_config(channels);
    let (writer, mut peer) = tokio::io::duplex(64 * 1024);

    run_session(&config, feed, writer, backend).await.unwrap();

    let mut out = String::new();
    peer.read_to_string(&mut out).await.unwrap();
    assert!(out.ends_with("\r\n"));
    out.split("\r\n")
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// **Test: Full session: register, join, keepalive, private prompt, then clean end on EOF.**
#[tokio::test]
async fn test_session_end_to_end() {
    let backend = Arc::new(MockLlmClient::replying("Hello alice"));
    let feed = b":irc.test NOTICE * :*** Looking up your hostname\r\n\
:irc.test 001 bot :Welcome\r\n\
:bot!b@h JOIN #chan\r\n\
PING :abc123\r\n\
:alice!a@h PRIVMSG bot :hi\r\n";

    let lines = run_feed(&["#chan"], feed, backend.clone()).await;

    assert_eq!(
        lines,
        vec![
            "NICK bot",
            "USER bot * * :Bot Relay",
            "JOIN #chan",
            "PONG abc123",
            "PRIVMSG alice :Please wait...",
            "PRIVMSG alice :Hello alice",
        ]
    );
    assert_eq!(backend.calls().len(), 1);
}

/// **Test: Empty feed: registration is sent, then EOF ends the session without error.**
#[tokio::test]
async fn test_session_ends_on_eof() {
    let backend = Arc::new(MockLlmClient::default());

    let lines = run_feed(&[], b"", backend).await;

    assert_eq!(lines, vec!["NICK bot", "USER bot * * :Bot Relay"]);
}

/// **Test: Malformed and blank lines are skipped; the loop keeps going.**
#[tokio::test]
async fn test_session_skips_malformed_lines() {
    let backend = Arc::new(MockLlmClient::default());
    let feed = b":onlyprefix\r\n\r\n   \r\nPING :still-alive\r\n";

    let lines = run_feed(&[], feed, backend).await;

    assert_eq!(lines.last().map(String::as_str), Some("PONG still-alive"));
    assert_eq!(lines.len(), 3);
}

/// **Test: Latin-1 bytes are decoded instead of failing the loop.**
#[tokio::test]
async fn test_session_decodes_latin1() {
    let backend = Arc::new(MockLlmClient::replying("Oui"));
    let feed: &[u8] = b":alice!a@h PRIVMSG bot :caf\xe9 au lait\r\n";

    let lines = run_feed(&[], feed, backend.clone()).await;

    assert_eq!(lines.last().map(String::as_str), Some("PRIVMSG alice Oui"));
    assert_eq!(backend.calls()[0][1].content, "café au lait");
}

/// **Test: Bare LF terminators are accepted.**
#[tokio::test]
async fn test_session_accepts_lf_only() {
    let backend = Arc::new(MockLlmClient::default());

    let lines = run_feed(&[], b"PING :one\nPING :two\n", backend).await;

    assert_eq!(&lines[2..], &["PONG one", "PONG two"]);
}
