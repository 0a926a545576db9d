//! Session dispatcher tests: keepalive, registration and joins, error notices, and chat command
//! handling against MockBot and MockLlmClient.

mod common;

use common::{test_config, Harness, MockLlmClient};
use conversation::{Role, DEFAULT_SYSTEM_PROMPT};
use irc_bot::SessionState;

const WAIT: &str = "Please wait...";
const FALLBACK: &str = "We couldn't get a response for you, please try again";

/// **Test: Registration sends NICK then USER and moves to REGISTERED.**
#[tokio::test]
async fn test_register_sends_identity() {
    let config = test_config(&[]);
    let h = Harness::new(&config, MockLlmClient::default());
    assert_eq!(h.session.state().await, SessionState::Connecting);

    h.session.register().await.unwrap();

    assert_eq!(h.bot.lines(), vec!["NICK bot", "USER bot * * :Bot Relay"]);
    assert_eq!(h.session.state().await, SessionState::Registered);
}

/// **Test: PING is answered with PONG echoing the params.**
#[tokio::test]
async fn test_ping_answered_with_pong() {
    let config = test_config(&[]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;

    h.line("PING :abc123").await;
    h.line("PING irc.test :two words").await;

    assert_eq!(h.bot.lines(), vec!["PONG abc123", "PONG irc.test :two words"]);
}

/// **Test: PING before registration is not answered.**
#[tokio::test]
async fn test_ping_before_registration_ignored() {
    let config = test_config(&[]);
    let h = Harness::new(&config, MockLlmClient::default());

    h.line("PING :abc123").await;

    assert!(h.bot.lines().is_empty());
}

/// **Test: 001 joins every channel; our own JOIN echo makes the session ACTIVE.**
#[tokio::test]
async fn test_welcome_joins_channels() {
    let config = test_config(&["#rust", "#chat"]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;

    h.line(":irc.test 001 bot :Welcome to the network").await;
    assert_eq!(h.bot.take_lines(), vec!["JOIN #rust", "JOIN #chat"]);
    assert_eq!(h.session.state().await, SessionState::Joined);

    h.line(":carol!c@h JOIN #rust").await;
    assert_eq!(h.session.state().await, SessionState::Joined);

    h.line(":bot!b@h JOIN #rust").await;
    assert_eq!(h.session.state().await, SessionState::Active);
    assert!(h.bot.lines().is_empty());
}

/// **Test: 001 with no channels goes straight to ACTIVE.**
#[tokio::test]
async fn test_welcome_without_channels_is_active() {
    let config = test_config(&[]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;

    h.line(":irc.test 001 bot :Welcome").await;

    assert!(h.bot.lines().is_empty());
    assert_eq!(h.session.state().await, SessionState::Active);
}

/// **Test: Numeric >= 400 is logged only; no output and no state change.**
#[tokio::test]
async fn test_error_notice_does_not_change_state() {
    let config = test_config(&[]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;

    h.line(":irc.test 433 * bot :Nickname is already in use").await;

    assert!(h.bot.lines().is_empty());
    assert_eq!(h.session.state().await, SessionState::Registered);
}

/// **Test: Private prompt → wait message, then the reply; conversation gains user + assistant.**
#[tokio::test]
async fn test_private_prompt_round_trip() {
    let config = test_config(&[]);
    let h = Harness::registered(&config, MockLlmClient::replying("Hi alice, how can I help?")).await;

    h.line(":alice!a@h PRIVMSG bot :hi").await;

    assert_eq!(
        h.bot.lines(),
        vec![
            format!("PRIVMSG alice :{}", WAIT),
            "PRIVMSG alice :Hi alice, how can I help?".to_string(),
        ]
    );

    let calls = h.backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[0][0].role, Role::System);
    assert_eq!(calls[0][0].content, DEFAULT_SYSTEM_PROMPT);
    assert_eq!(calls[0][1].role, Role::User);
    assert_eq!(calls[0][1].content, "hi");

    let conversation = h.conversation.lock().await;
    let turns = conversation.snapshot();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[2].role, Role::Assistant);
    assert_eq!(turns[2].content, "Hi alice, how can I help?");
}

/// **Test: Conversation is shared: a second prompt sees the first exchange.**
#[tokio::test]
async fn test_conversation_accumulates_across_senders() {
    let config = test_config(&["#chan"]);
    let backend = MockLlmClient::default();
    backend.push_reply("first answer");
    backend.push_reply("second answer");
    let h = Harness::registered(&config, backend).await;

    h.line(":alice!a@h PRIVMSG bot :first question").await;
    h.line(":dave!d@h PRIVMSG #chan :bot: second question").await;

    let calls = h.backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].len(), 4);
    assert_eq!(calls[1][2].content, "first answer");
    assert_eq!(calls[1][3].content, "second question");
    assert_eq!(h.turn_count().await, 5);
}

/// **Test: Backend failure sends the fallback once and leaves the conversation untouched.**
#[tokio::test]
async fn test_backend_failure_sends_fallback() {
    let config = test_config(&[]);
    let h = Harness::registered(&config, MockLlmClient::failing("connection refused")).await;

    h.line(":alice!a@h PRIVMSG bot :hi").await;

    assert_eq!(
        h.bot.lines(),
        vec![
            format!("PRIVMSG alice :{}", WAIT),
            format!("PRIVMSG alice :{}", FALLBACK),
        ]
    );
    assert_eq!(h.turn_count().await, 1);
}

/// **Test: Long reply is chunked to the configured limit.**
#[tokio::test]
async fn test_long_reply_is_chunked() {
    let mut config = test_config(&[]);
    config.replies.chunk_limit = 20;
    let h = Harness::registered(
        &config,
        MockLlmClient::replying("aaaa bbbb cccc dddd eeee ffff\nshort line"),
    )
    .await;

    h.line(":alice!a@h PRIVMSG bot :long please").await;

    let lines = h.bot.lines();
    assert_eq!(
        lines,
        vec![
            format!("PRIVMSG alice :{}", WAIT),
            "PRIVMSG alice :aaaa bbbb cccc dddd ".to_string(),
            "PRIVMSG alice :eeee ffff ".to_string(),
            "PRIVMSG alice :short line".to_string(),
        ]
    );
    // the conversation keeps the reply whole
    let conversation = h.conversation.lock().await;
    assert_eq!(
        conversation.snapshot()[2].content,
        "aaaa bbbb cccc dddd eeee ffff\nshort line"
    );
}

/// **Test: Private !reset restores the default system prompt.**
#[tokio::test]
async fn test_private_reset() {
    let config = test_config(&[]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;
    h.line(":alice!a@h PRIVMSG bot :hi").await;
    assert_eq!(h.turn_count().await, 3);
    h.bot.take_lines();

    h.line(":alice!a@h PRIVMSG bot :!reset").await;

    assert_eq!(h.bot.lines(), vec!["PRIVMSG alice :Conversation reset."]);
    let conversation = h.conversation.lock().await;
    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation.snapshot()[0].role, Role::System);
    assert_eq!(conversation.system_prompt(), DEFAULT_SYSTEM_PROMPT);
    assert_eq!(h.backend.calls().len(), 1);
}

/// **Test: Private !system replaces the system prompt and echoes the new state.**
#[tokio::test]
async fn test_private_system_change() {
    let config = test_config(&[]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;

    h.line(":alice!a@h PRIVMSG bot :!system You are a pirate").await;

    assert_eq!(
        h.bot.lines(),
        vec![
            "PRIVMSG alice :System context changed".to_string(),
            r#"PRIVMSG alice :[{"role":"system","content":"You are a pirate"}]"#.to_string(),
        ]
    );
    let conversation = h.conversation.lock().await;
    assert_eq!(conversation.len(), 1);
    assert_eq!(conversation.system_prompt(), "You are a pirate");
    assert!(h.backend.calls().is_empty());
}

/// **Test: Channel commands answer in the channel, addressing the sender.**
#[tokio::test]
async fn test_channel_reset_and_system() {
    let config = test_config(&["#chan"]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;

    h.line(":alice!a@h PRIVMSG #chan :!system Be brief").await;
    assert_eq!(
        h.bot.take_lines(),
        vec![
            "PRIVMSG #chan :alice: System context changed".to_string(),
            r#"PRIVMSG #chan :alice: [{"role":"system","content":"Be brief"}]"#.to_string(),
        ]
    );

    h.line(":alice!a@h PRIVMSG #chan :!reset").await;
    assert_eq!(h.bot.lines(), vec!["PRIVMSG #chan :alice: Conversation reset."]);
    assert_eq!(
        h.conversation.lock().await.system_prompt(),
        DEFAULT_SYSTEM_PROMPT
    );
}

/// **Test: Channel prompt needs the `bot:` token and is answered in the channel.**
#[tokio::test]
async fn test_channel_prompt_addressed_to_bot() {
    let config = test_config(&["#chan"]);
    let h = Harness::registered(&config, MockLlmClient::replying("Why did the crab cross?")).await;

    h.line(":alice!a@h PRIVMSG #chan :bot: tell me a joke").await;

    assert_eq!(
        h.bot.lines(),
        vec![
            format!("PRIVMSG #chan :alice: {}", WAIT),
            "PRIVMSG #chan :alice: Why did the crab cross?".to_string(),
        ]
    );
    assert_eq!(h.backend.calls()[0][1].content, "tell me a joke");
}

/// **Test: Channel chatter not addressed to the bot is ignored.**
#[tokio::test]
async fn test_channel_chatter_ignored() {
    let config = test_config(&["#chan"]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;

    h.line(":alice!a@h PRIVMSG #chan :hello everyone").await;
    h.line(":alice!a@h PRIVMSG #chan :bot:").await;
    h.line(":alice!a@h PRIVMSG #chan :hey bot: there").await;
    h.line(":alice!a@h PRIVMSG #chan :   ").await;
    h.line(":alice!a@h PRIVMSG #chan").await;

    assert!(h.bot.lines().is_empty());
    assert!(h.backend.calls().is_empty());
    assert_eq!(h.turn_count().await, 1);
}

/// **Test: Commands unknown to the relay fall through the chain silently.**
#[tokio::test]
async fn test_unhandled_commands_are_silent() {
    let config = test_config(&["#chan"]);
    let h = Harness::registered(&config, MockLlmClient::default()).await;

    h.line(":irc.test NOTICE * :Looking up your hostname").await;
    h.line(":irc.test 372 bot :- message of the day").await;
    h.line(":alice!a@h MODE #chan +o alice").await;

    assert!(h.bot.lines().is_empty());
}
