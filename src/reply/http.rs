// ABOUTME: HTTP reply service client — POSTs {"message"} as JSON and reads back the reply field.
// ABOUTME: Transport, status, and decode failures map onto ReplyError kinds.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reply::{ReplyError, ReplyService};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default, alias = "text")]
    reply: Option<String>,
}

/// Reply service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReplyService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReplyService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

fn map_transport(e: reqwest::Error) -> ReplyError {
    if e.is_decode() {
        ReplyError::Malformed(e.to_string())
    } else {
        ReplyError::Transport(e.to_string())
    }
}

#[async_trait]
impl ReplyService for HttpReplyService {
    async fn reply(&self, message: &str) -> Result<Option<String>, ReplyError> {
        debug!(endpoint = %self.endpoint, "requesting reply");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReplyError::Status(status.as_u16()));
        }

        let body: ChatResponse = response.json().await.map_err(map_transport)?;
        Ok(body.reply)
    }
}
