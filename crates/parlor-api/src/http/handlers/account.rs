//! Registration and login handlers.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use parlor_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub personality: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

/// POST /api/register
///
/// Creates a user and returns the full row. Duplicate names are a 409.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Name must not be empty".to_string()));
    }

    let user = state.account_service.register(name, req.personality).await?;
    Ok(Json(user))
}

/// POST /api/login
///
/// Name-only login: an exact-name lookup returning the user row, or 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let user = state.account_service.login(req.name.trim()).await?;
    Ok(Json(user))
}
