//! Chat-turn handler: the single LLM-backed endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use parlor_types::user::PreferenceMap;

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnRequest {
    pub chat_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnResponse {
    pub reply: String,
    pub updated_preferences: PreferenceMap,
}

/// POST /api/chat
///
/// Runs one full turn: prompt assembly, provider call, preference
/// extraction, and atomic persistence of the (user, bot) message pair.
pub async fn chat_turn(
    State(state): State<AppState>,
    Json(req): Json<ChatTurnRequest>,
) -> Result<Json<ChatTurnResponse>, AppError> {
    let chat_id = parse_uuid(&req.chat_id, "chat id")?;
    if req.message.trim().is_empty() {
        return Err(AppError::Validation(
            "Message must not be empty".to_string(),
        ));
    }

    let outcome = state.turn_engine.run(chat_id, req.message).await?;
    Ok(Json(ChatTurnResponse {
        reply: outcome.reply,
        updated_preferences: outcome.preferences,
    }))
}
