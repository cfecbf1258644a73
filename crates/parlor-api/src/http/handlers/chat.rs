//! Chat thread lifecycle handlers: create, rename, delete, list, persona.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use parlor_types::chat::Chat;
use parlor_types::user::PreferenceMap;

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatRequest {
    pub user_id: String,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameChatRequest {
    pub title: String,
}

/// Persona view for the chat window header: the owning user's name,
/// personality, and preference mapping.
#[derive(Debug, Serialize)]
pub struct ChatInfoResponse {
    pub name: String,
    pub personality: String,
    pub preferences: PreferenceMap,
}

/// POST /api/new-chat
pub async fn new_chat(
    State(state): State<AppState>,
    Json(req): Json<NewChatRequest>,
) -> Result<Json<Chat>, AppError> {
    let user_id = parse_uuid(&req.user_id, "user id")?;
    let chat = state.chat_service.create_chat(user_id, req.title).await?;
    Ok(Json(chat))
}

/// PUT /api/chats/{chat_id}
pub async fn rename_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Json(req): Json<RenameChatRequest>,
) -> Result<Json<Chat>, AppError> {
    let chat_id = parse_uuid(&chat_id, "chat id")?;
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }

    let chat = state.chat_service.rename_chat(&chat_id, title).await?;
    Ok(Json(chat))
}

/// DELETE /api/chats/{chat_id}
///
/// Idempotent: deleting an absent chat still reports success. Messages are
/// left in place and stay retrievable by chat id.
pub async fn delete_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let chat_id = parse_uuid(&chat_id, "chat id")?;
    state.chat_service.delete_chat(&chat_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/chats/{user_id}
///
/// All of a user's chats, newest first. An unknown user id yields an empty
/// list, not an error.
pub async fn list_chats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Chat>>, AppError> {
    let user_id = parse_uuid(&user_id, "user id")?;
    let chats = state.chat_service.list_chats(&user_id).await?;
    Ok(Json(chats))
}

/// GET /api/chat-info/{chat_id}
pub async fn chat_info(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatInfoResponse>, AppError> {
    let chat_id = parse_uuid(&chat_id, "chat id")?;
    let persona = state.chat_service.get_persona(&chat_id).await?;
    Ok(Json(ChatInfoResponse {
        name: persona.name,
        personality: persona.personality,
        preferences: persona.preferences,
    }))
}
