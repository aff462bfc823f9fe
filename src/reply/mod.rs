// ABOUTME: Reply service boundary — the collaborator that produces bot replies for user text.
// ABOUTME: Errors are a closed enum mapped once here; callers treat every kind as "use the fallback".

pub mod http;
pub mod server;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpReplyService;

/// Reply used whenever the service fails or returns nothing usable.
pub const FALLBACK_REPLY: &str = "I'm just a bot, but I'll try to help!";

/// Ways a reply request can fail.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply service unreachable: {0}")]
    Transport(String),
    #[error("reply service returned HTTP {0}")]
    Status(u16),
    #[error("malformed reply: {0}")]
    Malformed(String),
}

/// Produces a reply for a single user message.
///
/// `Ok(None)` means the service answered but had no reply text.
#[async_trait]
pub trait ReplyService: Send + Sync {
    async fn reply(&self, message: &str) -> Result<Option<String>, ReplyError>;
}
