//! Shared domain types for Parlor.
//!
//! This crate contains the core domain types used across the Parlor chat
//! service: User, Chat, Message, the LLM request/response shapes, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
pub mod user;
