// ABOUTME: Session module — the chat session controller and its persistence/export collaborators.
// ABOUTME: The controller is the only writer of the stored message log.

pub mod controller;
pub mod export;
pub mod message;
pub mod storage;

pub use controller::{
    ChatSession, ClearConfirmation, PendingReply, ResolvedReply, ReplyTiming, STORAGE_KEY,
    SessionParams, SessionState, StaleReplyPolicy,
};
pub use export::{DirectoryExportSink, ExportOutcome, ExportSink};
pub use message::{ChatMessage, Sender};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
