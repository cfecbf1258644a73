//! HTTP/REST API layer for Parlor.
//!
//! Axum-based JSON API at `/api/` with wide-open CORS and request tracing.
//! Responses are bare rows, matching the contract the browser client
//! expects; errors are `{"error": ...}` bodies with a mapped status code.

pub mod error;
pub mod handlers;
pub mod router;
