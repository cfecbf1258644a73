//! SQLite storage implementations.

pub mod chat;
pub mod pool;
pub mod user;
