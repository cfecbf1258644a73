//! Request handlers for the REST API.

pub mod account;
pub mod chat;
pub mod message;
pub mod turn;

use uuid::Uuid;

use crate::http::error::AppError;

/// Parse a path segment as a UUID, mapping failure to a 400.
fn parse_uuid(value: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| AppError::Validation(format!("Invalid {what}: '{value}'")))
}
