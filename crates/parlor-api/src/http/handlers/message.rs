//! Message history handler.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use parlor_types::chat::Sender;

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::state::AppState;

/// Message as the client renders it: sender, text, and timestamp only.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/messages/{chat_id}
///
/// Full history in timestamp order. An unknown chat id (including a deleted
/// chat whose messages survive) yields whatever messages carry that id,
/// possibly an empty list.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let chat_id = parse_uuid(&chat_id, "chat id")?;
    let messages = state.chat_service.get_messages(&chat_id).await?;
    let views = messages
        .into_iter()
        .map(|m| MessageView {
            sender: m.sender,
            content: m.content,
            timestamp: m.timestamp,
        })
        .collect();
    Ok(Json(views))
}
