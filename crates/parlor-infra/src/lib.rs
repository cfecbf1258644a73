//! Infrastructure layer for Parlor.
//!
//! Contains implementations of the repository and provider traits defined in
//! `parlor-core`: SQLite storage via sqlx and the OpenAI-compatible
//! completion provider via async-openai.

pub mod llm;
pub mod sqlite;
