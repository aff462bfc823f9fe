// ABOUTME: Integration tests for the session log on disk — restart, clear, and export flows.
// ABOUTME: Uses FileStore and DirectoryExportSink inside temp directories.

use std::sync::Arc;

use async_trait::async_trait;

use botchat::reply::{ReplyError, ReplyService};
use botchat::session::{
    ChatSession, ClearConfirmation, DirectoryExportSink, ExportOutcome, FileStore, ReplyTiming,
    STORAGE_KEY, Sender, SessionParams, StaleReplyPolicy, KeyValueStore,
};

struct CannedReplier;

#[async_trait]
impl ReplyService for CannedReplier {
    async fn reply(&self, _message: &str) -> Result<Option<String>, ReplyError> {
        Ok(Some("noted".to_string()))
    }
}

fn open(store: Arc<FileStore>) -> ChatSession {
    ChatSession::start(SessionParams {
        store,
        replier: Arc::new(CannedReplier),
        user: "ada@example.com".to_string(),
        timing: ReplyTiming::default(),
        stale_replies: StaleReplyPolicy::Append,
    })
}

/// The log survives a restart in the same order it was written.
#[tokio::test(start_paused = true)]
async fn history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));

    {
        let mut session = open(store.clone());
        session.send("first").await.unwrap();
        session.send("hello").await.unwrap();
    }

    let reopened = open(Arc::new(FileStore::new(dir.path())));
    let log: Vec<(Sender, &str)> = reopened
        .messages()
        .iter()
        .map(|m| (m.sender, m.text.as_str()))
        .collect();
    assert_eq!(
        log,
        vec![
            (Sender::User, "first"),
            (Sender::Bot, "noted"),
            (Sender::User, "hello"),
            (Sender::Bot, "Hello, ada@example.com!"),
        ]
    );
    assert!(dir.path().join(format!("{STORAGE_KEY}.json")).exists());
}

/// A corrupt stored log starts an empty session instead of failing.
#[test]
fn corrupt_history_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));
    store.set(STORAGE_KEY, "{ definitely not a list").unwrap();

    let session = open(store);
    assert!(session.messages().is_empty());
}

/// Clearing removes the stored copy, so a restart stays empty.
#[tokio::test(start_paused = true)]
async fn clear_removes_stored_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));

    let mut session = open(store.clone());
    session.send("remember me").await.unwrap();
    session.clear(ClearConfirmation::from_answer(true).unwrap());

    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    assert!(open(store).messages().is_empty());
}

/// Export writes one `[timestamp] SENDER: text` line per message.
#[tokio::test(start_paused = true)]
async fn export_writes_transcript_file() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut session = open(Arc::new(FileStore::new(data.path())));
    let sink = DirectoryExportSink::new(out.path());

    assert!(matches!(session.export(&sink).unwrap(), ExportOutcome::Empty));

    session.send("ping").await.unwrap();
    let ExportOutcome::Saved { filename, .. } = session.export(&sink).unwrap() else {
        panic!("expected a saved export");
    };
    assert!(filename.starts_with("chat_export_"));
    assert!(filename.ends_with(".txt"));

    let contents = std::fs::read_to_string(out.path().join(&filename)).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("] USER: ping"));
    assert!(lines[1].ends_with("] BOT: noted"));
}
