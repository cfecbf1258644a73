//! User account types for Parlor.
//!
//! A user is identified by a unique display name (also the login key) and
//! carries a personality label plus an open-ended preference mapping that the
//! chat-turn engine updates as the user states preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Open-ended per-user preference mapping.
///
/// String keys to string values, last-write-wins per key. There is no schema
/// and no merge strategy: whoever writes a key last owns it. Stored as a JSON
/// text column in SQLite. A `BTreeMap` keeps serialized output deterministic.
pub type PreferenceMap = BTreeMap<String, String>;

/// A registered user.
///
/// Users are created at registration and never deleted. The `name` is the
/// login key: there is no password or token, identity is asserted by the
/// client-supplied name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Free-form personality label, defaults to "neutral".
    pub personality: String,
    /// Inferred or stated preferences, updated by the chat-turn engine.
    pub preferences: PreferenceMap,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh user row with defaulted personality and empty preferences.
    pub fn new(name: String, personality: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            personality: personality.unwrap_or_else(|| "neutral".to_string()),
            preferences: PreferenceMap::new(),
            created_at: Utc::now(),
        }
    }
}

/// The slice of user data the chat-turn engine needs: who the bot is talking
/// to, how it should behave, and what it already knows about them.
///
/// Produced by the chat -> user join in the chat repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPersona {
    pub user_id: Uuid,
    pub name: String,
    pub personality: String,
    pub preferences: PreferenceMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_personality() {
        let user = User::new("ada".to_string(), None);
        assert_eq!(user.personality, "neutral");
        assert!(user.preferences.is_empty());
    }

    #[test]
    fn test_new_user_explicit_personality() {
        let user = User::new("ada".to_string(), Some("sarcastic".to_string()));
        assert_eq!(user.personality, "sarcastic");
    }

    #[test]
    fn test_preference_map_serializes_deterministically() {
        let mut prefs = PreferenceMap::new();
        prefs.insert("updated".to_string(), "jazz".to_string());
        prefs.insert("color".to_string(), "green".to_string());
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"color":"green","updated":"jazz"}"#);
    }

    #[test]
    fn test_user_serialize_includes_preferences() {
        let mut user = User::new("ada".to_string(), None);
        user.preferences
            .insert("updated".to_string(), "jazz".to_string());
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""preferences":{"updated":"jazz"}"#));
    }
}
