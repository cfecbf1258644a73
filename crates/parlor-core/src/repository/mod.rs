//! Repository trait definitions ("ports") implemented by `parlor-infra`.

pub mod chat;
pub mod user;
