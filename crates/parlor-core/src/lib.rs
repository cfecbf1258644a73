//! Business logic and repository trait definitions for Parlor.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements. It depends only on `parlor-types` --
//! never on `parlor-infra` or any database/IO crate.

pub mod account;
pub mod chat;
pub mod llm;
pub mod repository;
pub mod turn;
