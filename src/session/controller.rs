// ABOUTME: Chat session controller — owns the message log, persists it, and drives reply turns.
// ABOUTME: Two states (Idle, AwaitingReply); a submit hands back a PendingReply that completes the turn.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use chrono::Utc;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::reply::{FALLBACK_REPLY, ReplyService};
use crate::session::export::{ExportOutcome, ExportSink, export_filename, render_transcript};
use crate::session::message::{ChatMessage, Sender};
use crate::session::storage::KeyValueStore;

/// Storage key holding the serialized message log.
pub const STORAGE_KEY: &str = "chat_messages";

/// User text (trimmed, case-insensitive) that takes the canned greeting path.
pub const GREETING_TRIGGER: &str = "hello";

/// Artificial "typing" delays applied before a bot reply is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTiming {
    pub greeting_delay: Duration,
    pub reply_delay: Duration,
}

impl Default for ReplyTiming {
    fn default() -> Self {
        Self {
            greeting_delay: Duration::from_millis(1000),
            reply_delay: Duration::from_millis(2000),
        }
    }
}

/// What to do with a reply that resolves after the log was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleReplyPolicy {
    /// Append it to the (now empty) log.
    #[default]
    Append,
    /// Discard it; the session still returns to idle.
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

/// Proof that the user explicitly agreed to wipe the chat history.
#[derive(Debug)]
pub struct ClearConfirmation {
    _private: (),
}

impl ClearConfirmation {
    /// Turn a yes/no answer into a confirmation. Only `true` yields one.
    pub fn from_answer(confirmed: bool) -> Option<Self> {
        confirmed.then_some(Self { _private: () })
    }
}

/// A bot reply ready to be appended, tagged with the generation it was requested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReply {
    generation: u64,
    text: String,
}

impl ResolvedReply {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The in-flight half of a submit. Await it, then pass the result to
/// [`ChatSession::complete`].
pub struct PendingReply {
    generation: u64,
    inner: BoxFuture<'static, String>,
}

impl Future for PendingReply {
    type Output = ResolvedReply;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let generation = self.generation;
        self.inner
            .poll_unpin(cx)
            .map(|text| ResolvedReply { generation, text })
    }
}

/// Collaborators and settings for a session.
pub struct SessionParams {
    pub store: Arc<dyn KeyValueStore>,
    pub replier: Arc<dyn ReplyService>,
    /// Display identity used in the canned greeting.
    pub user: String,
    pub timing: ReplyTiming,
    pub stale_replies: StaleReplyPolicy,
}

/// One user's conversation: the message log plus the request/reply state machine.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: SessionState,
    generation: u64,
    store: Arc<dyn KeyValueStore>,
    replier: Arc<dyn ReplyService>,
    user: String,
    timing: ReplyTiming,
    stale_replies: StaleReplyPolicy,
}

impl ChatSession {
    /// Start a session, restoring any previously stored log.
    pub fn start(params: SessionParams) -> Self {
        let messages = load_messages(params.store.as_ref());
        info!(restored = messages.len(), "chat session started");
        Self {
            messages,
            state: SessionState::Idle,
            generation: 0,
            store: params.store,
            replier: params.replier,
            user: params.user,
            timing: params.timing,
            stale_replies: params.stale_replies,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SessionState::AwaitingReply
    }

    /// Incremented on every clear.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Append the user's message and start a reply turn.
    ///
    /// Returns `None` without touching the log when `text` is blank or a reply
    /// is already outstanding.
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if self.is_busy() {
            debug!("submission ignored while awaiting a reply");
            return None;
        }

        self.append(ChatMessage::now(Sender::User, text));
        self.state = SessionState::AwaitingReply;

        let inner = resolve_reply(
            text.to_string(),
            self.user.clone(),
            Arc::clone(&self.replier),
            self.timing,
        )
        .boxed();
        Some(PendingReply {
            generation: self.generation,
            inner,
        })
    }

    /// Finish a reply turn: append the bot message and return to idle.
    pub fn complete(&mut self, reply: ResolvedReply) -> Option<&ChatMessage> {
        if !self.is_busy() {
            warn!("reply arrived with no outstanding request; ignoring");
            return None;
        }
        self.state = SessionState::Idle;

        if reply.generation != self.generation {
            match self.stale_replies {
                StaleReplyPolicy::Drop => {
                    info!(
                        requested_in = reply.generation,
                        current = self.generation,
                        "dropping reply requested before the log was cleared"
                    );
                    return None;
                }
                StaleReplyPolicy::Append => {
                    debug!("appending reply requested before the log was cleared");
                }
            }
        }

        self.append(ChatMessage::now(Sender::Bot, reply.text));
        self.messages.last()
    }

    /// Submit, wait for the reply, and complete the turn in one call.
    pub async fn send(&mut self, text: &str) -> Option<ChatMessage> {
        let pending = self.submit(text)?;
        let reply = pending.await;
        self.complete(reply).cloned()
    }

    /// Wipe the log and its stored copy.
    pub fn clear(&mut self, _confirmation: ClearConfirmation) {
        let removed = self.messages.len();
        self.messages.clear();
        self.generation += 1;
        if let Err(e) = self.store.remove(STORAGE_KEY) {
            warn!(error = %e, "failed to remove stored chat history");
        }
        info!(removed, busy = self.is_busy(), "chat history cleared");
    }

    /// Render the log and hand it to `sink`. An empty log exports nothing.
    pub fn export(&self, sink: &dyn ExportSink) -> anyhow::Result<ExportOutcome> {
        if self.messages.is_empty() {
            return Ok(ExportOutcome::Empty);
        }
        let filename = export_filename(Utc::now());
        let contents = render_transcript(&self.messages);
        let location = sink.save(&filename, &contents)?;
        info!(messages = self.messages.len(), %location, "chat exported");
        Ok(ExportOutcome::Saved { filename, location })
    }

    fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.persist();
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.messages) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize chat history");
                return;
            }
        };
        if let Err(e) = self.store.set(STORAGE_KEY, &json) {
            warn!(error = %e, "failed to persist chat history");
        }
    }
}

/// Read the stored log. Missing or unreadable data is an empty history.
pub fn load_messages(store: &dyn KeyValueStore) -> Vec<ChatMessage> {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "failed to read stored chat history; starting empty");
            return Vec::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "stored chat history is unreadable; starting empty");
        Vec::new()
    })
}

/// Whether `text` takes the canned greeting path.
pub fn is_greeting(text: &str) -> bool {
    text.trim().to_lowercase() == GREETING_TRIGGER
}

async fn resolve_reply(
    text: String,
    user: String,
    replier: Arc<dyn ReplyService>,
    timing: ReplyTiming,
) -> String {
    if is_greeting(&text) {
        tokio::time::sleep(timing.greeting_delay).await;
        return format!("Hello, {user}!");
    }

    let reply = match replier.reply(&text).await {
        Ok(Some(reply)) if !reply.trim().is_empty() => reply.trim().to_string(),
        Ok(_) => {
            debug!("reply service returned no reply text");
            FALLBACK_REPLY.to_string()
        }
        Err(e) => {
            warn!(error = %e, "reply service failed; using fallback reply");
            FALLBACK_REPLY.to_string()
        }
    };
    tokio::time::sleep(timing.reply_delay).await;
    reply
}
