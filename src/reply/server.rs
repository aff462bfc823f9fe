// ABOUTME: Stub reply endpoint — an axum router answering POST /api/chat with a canned reply.
// ABOUTME: Any other method on the path gets 405; an unreadable body gets 500.

use std::net::SocketAddr;

use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::reply::FALLBACK_REPLY;

/// Path the stub answers on.
pub const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

/// Build the stub router.
pub fn router() -> Router {
    Router::new().route(CHAT_PATH, post(chat).fallback(method_not_allowed))
}

async fn chat(payload: Result<Json<ChatRequest>, JsonRejection>) -> (StatusCode, Json<Value>) {
    match payload {
        Ok(Json(request)) => {
            info!(chars = request.message.chars().count(), "chat request");
            (StatusCode::OK, Json(json!({ "reply": FALLBACK_REPLY })))
        }
        Err(rejection) => {
            warn!(%rejection, "failed to read chat request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process message" })),
            )
        }
    }
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

/// Serve the stub on `addr` until the process is stopped.
pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "reply stub listening");
    axum::serve(listener, router()).await?;
    Ok(())
}
