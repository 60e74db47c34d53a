//! Chat transport webhook

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use pesa_core::InboundMessage;

#[derive(Debug, Serialize)]
pub struct MessageReply {
    /// Text to post back to the channel; `null` when the message is ignored
    pub reply: Option<String>,
}

/// POST /api/messages - Dispatch one inbound chat message
///
/// Ingestion blocks (database writes, retry backoff), so it runs on the
/// blocking pool.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(message): Json<InboundMessage>,
) -> Result<Json<MessageReply>, AppError> {
    let reply = tokio::task::spawn_blocking(move || state.bot.handle(&message)).await?;
    Ok(Json(MessageReply { reply }))
}
