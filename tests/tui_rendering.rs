// ABOUTME: E2E tests for TUI rendering and the event loop using ratatui's TestBackend.
// ABOUTME: Verifies the chat pane, typing indicator, modal, status bar, and a scripted chat turn.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use botchat::identity::UserIdentity;
use botchat::reply::{ReplyError, ReplyService};
use botchat::session::{
    ChatMessage, ChatSession, ExportSink, MemoryStore, ReplyTiming, STORAGE_KEY, Sender,
    SessionParams, StaleReplyPolicy, KeyValueStore,
};
use botchat::tui::state::{ChatView, TuiState};
use botchat::tui::{run_chat, ui};

/// Extract a single row of text from the terminal buffer as a String.
fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buf = terminal.backend().buffer();
    let width = buf.area.width;
    (0..width)
        .map(|x| {
            buf.cell((x, y))
                .map(|c| c.symbol().chars().next().unwrap_or(' '))
                .unwrap_or(' ')
        })
        .collect()
}

/// Extract all text from the terminal buffer as a single string (rows joined by newlines).
fn all_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let height = buf.area.height;
    (0..height)
        .map(|y| row_text(terminal, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn new_state() -> TuiState {
    TuiState::new(UserIdentity::new("ada@example.com"))
}

fn draw(terminal: &mut Terminal<TestBackend>, state: &mut TuiState, messages: &[ChatMessage], busy: bool) {
    terminal
        .draw(|frame| ui::render(frame, state, ChatView { messages, busy }))
        .unwrap();
}

/// The header row shows the title, the greeting, and the avatar initial.
#[test]
fn renders_header_with_identity() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = new_state();
    draw(&mut terminal, &mut state, &[], false);

    let header = row_text(&terminal, 0);
    assert!(header.contains("Chat Bot"), "got: {:?}", header);
    assert!(header.contains("Hello, ada@example.com"), "got: {:?}", header);
    assert!(header.contains(" A "), "avatar initial missing, got: {:?}", header);
}

/// An empty, idle log shows the start placeholder and the input placeholder.
#[test]
fn renders_empty_state_placeholders() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = new_state();
    draw(&mut terminal, &mut state, &[], false);

    let text = all_text(&terminal);
    assert!(text.contains("Start Chat..."), "got:\n{}", text);
    assert!(text.contains("Type a message..."), "got:\n{}", text);
}

/// While busy the typing indicator is shown and the placeholder changes.
#[test]
fn renders_typing_indicator_when_busy() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = new_state();
    let messages = vec![ChatMessage::new(Sender::User, "Hello bot!", "9:00:00 AM")];
    draw(&mut terminal, &mut state, &messages, true);

    let text = all_text(&terminal);
    assert!(text.contains("Hello bot!"), "got:\n{}", text);
    assert!(text.contains("Bot is typing..."), "got:\n{}", text);
    assert!(!text.contains("Start Chat..."), "got:\n{}", text);
    assert!(!text.contains("Type a message..."), "got:\n{}", text);
}

/// The status bar (last row) shows the message count and any notice.
#[test]
fn renders_status_bar_notice() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = new_state();
    state.notice = Some("No chat history to export.".to_string());
    draw(&mut terminal, &mut state, &[], false);

    let status = row_text(&terminal, 23);
    assert!(status.contains("0 messages"), "got: {:?}", status);
    assert!(status.contains("No chat history to export."), "got: {:?}", status);
}

/// Opening the clear modal renders the confirmation prompt.
#[test]
fn renders_clear_modal() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = new_state();
    state.confirm_clear = true;
    draw(&mut terminal, &mut state, &[], false);

    let text = all_text(&terminal);
    assert!(text.contains("Clear Chat?"), "got:\n{}", text);
    assert!(text.contains("[y] Confirm"), "got:\n{}", text);
}

/// With scroll_offset at 0, the viewport stays pinned to the newest message.
#[test]
fn viewport_pinned_to_newest_message() {
    let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    let mut state = new_state();
    let messages: Vec<ChatMessage> = (0..10)
        .map(|i| ChatMessage::new(Sender::User, format!("message {i}"), "9:00:00 AM"))
        .collect();
    draw(&mut terminal, &mut state, &messages, false);

    let text = all_text(&terminal);
    assert!(text.contains("message 9"), "got:\n{}", text);
    assert!(!text.contains("message 0"), "got:\n{}", text);
}

/// Scroll offsets past the top of the content are clamped during render.
#[test]
fn scroll_offset_is_clamped() {
    let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    let mut state = new_state();
    let messages: Vec<ChatMessage> = (0..10)
        .map(|i| ChatMessage::new(Sender::Bot, format!("reply {i}"), "9:00:00 AM"))
        .collect();
    state.scroll_offset = 500;
    draw(&mut terminal, &mut state, &messages, false);

    assert!(state.scroll_offset > 0 && state.scroll_offset < 500);
    assert!(all_text(&terminal).contains("reply 0"));
}

/// A log whose wrapped height exceeds u16::MAX still pins the newest message,
/// and scrolling up from there reveals the one before it.
#[test]
fn very_long_history_stays_pinned_to_newest_message() {
    let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    let mut state = new_state();
    // Three rendered rows per message: text, timestamp, separator.
    let messages: Vec<ChatMessage> = (0..21_900)
        .map(|i| ChatMessage::new(Sender::User, format!("msg {i}"), "9:00:00 AM"))
        .collect();

    draw(&mut terminal, &mut state, &messages, false);
    let text = all_text(&terminal);
    assert!(text.contains("msg 21899"), "newest message not visible:\n{}", text);
    assert_eq!(state.scroll_offset, 0);

    state.scroll_offset = 3;
    draw(&mut terminal, &mut state, &messages, false);
    let text = all_text(&terminal);
    assert!(text.contains("msg 21898"), "got:\n{}", text);
    assert!(!text.contains("msg 21899"), "got:\n{}", text);
    assert_eq!(state.scroll_offset, 3);
}

/// Cursor should be clamped to the input viewport when the input text exceeds available width.
#[test]
fn cursor_is_clamped_inside_input_viewport_for_long_input() {
    let mut terminal = Terminal::new(TestBackend::new(12, 8)).unwrap();
    let mut state = new_state();
    state.input = "abcdefghijklmnopqrstuvwxyz".to_string();
    state.cursor_pos = state.input.chars().count();
    draw(&mut terminal, &mut state, &[], false);

    let cursor = terminal.get_cursor_position().unwrap();
    assert!(cursor.x < 12, "cursor x should stay within terminal width, got {:?}", cursor);
}

struct EchoReplier;

#[async_trait]
impl ReplyService for EchoReplier {
    async fn reply(&self, message: &str) -> Result<Option<String>, ReplyError> {
        Ok(Some(format!("echo: {message}")))
    }
}

struct NullSink;

impl ExportSink for NullSink {
    fn save(&self, filename: &str, _contents: &str) -> anyhow::Result<String> {
        Ok(filename.to_string())
    }
}

fn key(code: KeyCode) -> std::io::Result<Event> {
    Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn typed(text: &str) -> Vec<std::io::Result<Event>> {
    let mut events: Vec<_> = text.chars().map(|c| key(KeyCode::Char(c))).collect();
    events.push(key(KeyCode::Enter));
    events
}

/// A scripted turn through the event loop: the reply is appended and persisted
/// even though the key stream ends while the bot is still "typing".
#[tokio::test(start_paused = true)]
async fn event_loop_completes_a_chat_turn() {
    let store = Arc::new(MemoryStore::new());
    let mut session = ChatSession::start(SessionParams {
        store: store.clone(),
        replier: Arc::new(EchoReplier),
        user: "ada@example.com".to_string(),
        timing: ReplyTiming::default(),
        stale_replies: StaleReplyPolicy::Append,
    });
    let mut state = new_state();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    // The second message is typed while busy and must be ignored.
    let mut events = typed("ping");
    events.extend(typed("ignored"));
    let stream = futures::stream::iter(events);

    run_chat(&mut terminal, &mut session, &mut state, &NullSink, stream)
        .await
        .unwrap();

    let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["ping", "echo: ping"]);
    assert!(!session.is_busy());
    assert!(all_text(&terminal).contains("echo: ping"));

    let stored = store.get(STORAGE_KEY).unwrap().unwrap();
    assert!(stored.contains("echo: ping"));
}

/// Ctrl+L then y clears the log; Ctrl+E on the empty log shows the notice.
#[tokio::test(start_paused = true)]
async fn event_loop_clear_then_export_notice() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            STORAGE_KEY,
            r#"[{"sender":"user","text":"old","timestamp":"8:00:00 AM"}]"#,
        )
        .unwrap();
    let mut session = ChatSession::start(SessionParams {
        store: store.clone(),
        replier: Arc::new(EchoReplier),
        user: "ada@example.com".to_string(),
        timing: ReplyTiming::default(),
        stale_replies: StaleReplyPolicy::Append,
    });
    assert_eq!(session.messages().len(), 1);

    let mut state = new_state();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let events = vec![
        Ok(Event::Key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL))),
        key(KeyCode::Char('y')),
        Ok(Event::Key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL))),
    ];

    run_chat(
        &mut terminal,
        &mut session,
        &mut state,
        &NullSink,
        futures::stream::iter(events),
    )
    .await
    .unwrap();

    assert!(session.messages().is_empty());
    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    assert_eq!(state.notice.as_deref(), Some("No chat history to export."));
}
