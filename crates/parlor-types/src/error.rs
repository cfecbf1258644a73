use thiserror::Error;

use crate::llm::LlmError;

/// Errors related to user account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("user not found")]
    NotFound,

    #[error("name '{0}' is already taken")]
    NameTaken(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to chat thread operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat not found")]
    NotFound,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from a chat turn: the one operation that touches both the store
/// and the completion provider.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The chat does not exist or has no associated user row.
    #[error("chat not found")]
    ChatNotFound,

    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from repository operations (used by trait definitions in parlor-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
