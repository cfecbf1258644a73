//! Chat thread and message types for Parlor.
//!
//! A chat is a named conversation thread owned by one user. Messages are
//! created in (user, bot) pairs after each chat turn and are never mutated
//! or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who wrote a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A named conversation thread owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// Build a fresh chat row, defaulting the title to "New Chat".
    pub fn new(user_id: Uuid, title: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            title: title.unwrap_or_else(|| "New Chat".to_string()),
            created_at: Utc::now(),
        }
    }
}

/// A single message within a chat.
///
/// Ordering is defined only by `timestamp` (ties broken by the time-sortable
/// UUID v7 id); there is no sequence number, so strict ordering is not
/// guaranteed under clock skew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a fresh message row stamped with the current time.
    pub fn new(chat_id: Uuid, sender: Sender, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            chat_id,
            sender,
            content,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Bot] {
            let s = sender.to_string();
            let parsed: Sender = s.parse().unwrap();
            assert_eq!(sender, parsed);
        }
    }

    #[test]
    fn test_sender_serde() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
        let parsed: Sender = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Sender::Bot);
    }

    #[test]
    fn test_sender_rejects_unknown() {
        assert!("assistant".parse::<Sender>().is_err());
    }

    #[test]
    fn test_new_chat_defaults_title() {
        let chat = Chat::new(Uuid::now_v7(), None);
        assert_eq!(chat.title, "New Chat");
    }

    #[test]
    fn test_new_chat_explicit_title() {
        let chat = Chat::new(Uuid::now_v7(), Some("Jazz talk".to_string()));
        assert_eq!(chat.title, "Jazz talk");
    }

    #[test]
    fn test_message_ids_are_time_sortable() {
        let chat_id = Uuid::now_v7();
        let first = Message::new(chat_id, Sender::User, "hi".to_string());
        let second = Message::new(chat_id, Sender::Bot, "hello".to_string());
        assert!(first.id < second.id);
    }
}
