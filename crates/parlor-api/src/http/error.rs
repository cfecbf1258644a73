//! Application error type mapping to HTTP status codes.
//!
//! Taxonomy: not-found (missing user/chat -> 401/404), validation (bad
//! UUIDs -> 400), conflict (duplicate registration name -> 409), and
//! upstream failure (store or provider -> 500). Every handler surfaces its
//! error here; 500s are logged server-side and the body stays generic.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parlor_types::error::{AccountError, ChatError, TurnError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Account-related errors.
    Account(AccountError),
    /// Chat-related errors.
    Chat(ChatError),
    /// Chat-turn errors.
    Turn(TurnError),
    /// Validation error (malformed path parameters).
    Validation(String),
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<TurnError> for AppError {
    fn from(e: TurnError) -> Self {
        AppError::Turn(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Login miss is a 401 by contract: identity is asserted by name.
            AppError::Account(AccountError::NotFound) => {
                (StatusCode::UNAUTHORIZED, "User not found".to_string())
            }
            AppError::Account(AccountError::NameTaken(name)) => (
                StatusCode::CONFLICT,
                format!("Name '{name}' is already taken"),
            ),
            AppError::Chat(ChatError::NotFound) => {
                (StatusCode::NOT_FOUND, "Chat not found".to_string())
            }
            AppError::Turn(TurnError::ChatNotFound) => (
                StatusCode::NOT_FOUND,
                "Chat not found or user not associated".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Account(e) => {
                tracing::error!(error = %e, "Account operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not process request".to_string(),
                )
            }
            AppError::Chat(e) => {
                tracing::error!(error = %e, "Chat operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not process request".to_string(),
                )
            }
            AppError::Turn(e) => {
                tracing::error!(error = %e, "Chat turn failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing AI response".to_string(),
                )
            }
        };

        let body = json!({ "error": message });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_types::llm::LlmError;

    #[test]
    fn test_login_miss_is_unauthorized() {
        let resp = AppError::Account(AccountError::NotFound).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_duplicate_name_is_conflict() {
        let resp = AppError::Account(AccountError::NameTaken("ada".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_chat_is_not_found() {
        let resp = AppError::Chat(ChatError::NotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::Turn(TurnError::ChatNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_provider_failure_is_internal() {
        let err = AppError::Turn(TurnError::Provider(LlmError::Provider {
            message: "boom".to_string(),
        }));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_uuid_is_bad_request() {
        let resp = AppError::Validation("Invalid UUID: nope".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
