//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `parlor-core` using sqlx with split
//! read/write pools. Follows the same patterns as `SqliteUserRepository`:
//! raw queries, private Row structs, split reader/writer pool usage.
//!
//! `persist_turn` is the one multi-statement write in the system and runs
//! inside a single transaction on the writer pool.

use chrono::{DateTime, Utc};
use parlor_core::repository::chat::ChatRepository;
use parlor_types::chat::{Chat, Message, Sender};
use parlor_types::error::RepositoryError;
use parlor_types::user::{ChatPersona, PreferenceMap};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::user::{format_datetime, parse_datetime, parse_preferences};

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Chat.
struct ChatRow {
    id: String,
    user_id: String,
    title: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Chat {
            id,
            user_id,
            title: self.title,
            created_at,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: String,
    chat_id: String,
    sender: String,
    content: String,
    timestamp: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            sender: row.try_get("sender")?,
            content: row.try_get("content")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let chat_id = Uuid::parse_str(&self.chat_id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat_id: {e}")))?;
        let sender: Sender = self
            .sender
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let timestamp = parse_datetime(&self.timestamp)?;

        Ok(Message {
            id,
            chat_id,
            sender,
            content: self.content,
            timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_message<'e, E>(executor: E, message: &Message) -> Result<(), RepositoryError>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        r#"INSERT INTO messages (id, chat_id, sender, content, timestamp)
           VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(message.id.to_string())
    .bind(message.chat_id.to_string())
    .bind(message.sender.to_string())
    .bind(&message.content)
    .bind(format_datetime(&message.timestamp))
    .execute(executor)
    .await
    .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_chat(&self, chat: &Chat) -> Result<Chat, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chats (id, user_id, title, created_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(chat.id.to_string())
        .bind(chat.user_id.to_string())
        .bind(&chat.title)
        .bind(format_datetime(&chat.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(chat.clone())
    }

    async fn rename_chat(&self, chat_id: &Uuid, title: &str) -> Result<Chat, RepositoryError> {
        let result = sqlx::query("UPDATE chats SET title = ? WHERE id = ?")
            .bind(title)
            .bind(chat_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let row = sqlx::query("SELECT * FROM chats WHERE id = ?")
            .bind(chat_id.to_string())
            .fetch_one(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let chat_row =
            ChatRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        chat_row.into_chat()
    }

    async fn delete_chat(&self, chat_id: &Uuid) -> Result<bool, RepositoryError> {
        // Messages stay: the schema has no FK from messages to chats.
        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(chat_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_chats(&self, user_id: &Uuid) -> Result<Vec<Chat>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chats WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut chats = Vec::with_capacity(rows.len());
        for row in &rows {
            let chat_row =
                ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            chats.push(chat_row.into_chat()?);
        }

        Ok(chats)
    }

    async fn get_messages(&self, chat_id: &Uuid) -> Result<Vec<Message>, RepositoryError> {
        // UUID v7 ids break same-millisecond ties in insertion order.
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE chat_id = ? ORDER BY timestamp ASC, id ASC",
        )
        .bind(chat_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn get_persona(&self, chat_id: &Uuid) -> Result<Option<ChatPersona>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT users.id AS user_id, users.name, users.personality, users.preferences
               FROM users JOIN chats ON users.id = chats.user_id
               WHERE chats.id = ?"#,
        )
        .bind(chat_id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let personality: String = row
            .try_get("personality")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let preferences: String = row
            .try_get("preferences")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Some(ChatPersona {
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
            name,
            personality,
            preferences: parse_preferences(&preferences)?,
        }))
    }

    async fn persist_turn(
        &self,
        user_message: &Message,
        bot_message: &Message,
        preference_update: Option<(&Uuid, &PreferenceMap)>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if let Some((user_id, preferences)) = preference_update {
            let preferences_json = serde_json::to_string(preferences)
                .map_err(|e| RepositoryError::Query(format!("serialize preferences: {e}")))?;
            sqlx::query("UPDATE users SET preferences = ? WHERE id = ?")
                .bind(preferences_json)
                .bind(user_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        insert_message(&mut *tx, user_message).await?;
        insert_message(&mut *tx, bot_message).await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::user::SqliteUserRepository;
    use parlor_core::repository::user::UserRepository;
    use parlor_types::user::User;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn make_user(pool: &DatabasePool, name: &str) -> User {
        let repo = SqliteUserRepository::new(pool.clone());
        repo.create_user(&User::new(name.to_string(), None))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_chat_requires_existing_user() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let chat = Chat::new(Uuid::now_v7(), None);
        let err = repo.create_chat(&chat).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[tokio::test]
    async fn test_create_and_list_chats_newest_first() {
        let pool = test_pool().await;
        let user = make_user(&pool, "lister").await;
        let repo = SqliteChatRepository::new(pool);

        let mut ids = Vec::new();
        for i in 0..3 {
            let mut chat = Chat::new(user.id, Some(format!("chat {i}")));
            // Space creation times out so DESC ordering is unambiguous.
            chat.created_at = Utc::now() + chrono::Duration::seconds(i);
            repo.create_chat(&chat).await.unwrap();
            ids.push(chat.id);
        }

        let chats = repo.list_chats(&user.id).await.unwrap();
        assert_eq!(chats.len(), 3);
        assert_eq!(chats[0].id, ids[2]);
        assert_eq!(chats[2].id, ids[0]);
    }

    #[tokio::test]
    async fn test_rename_chat() {
        let pool = test_pool().await;
        let user = make_user(&pool, "renamer").await;
        let repo = SqliteChatRepository::new(pool);

        let chat = Chat::new(user.id, None);
        repo.create_chat(&chat).await.unwrap();
        assert_eq!(chat.title, "New Chat");

        let renamed = repo.rename_chat(&chat.id, "Jazz talk").await.unwrap();
        assert_eq!(renamed.id, chat.id);
        assert_eq!(renamed.title, "Jazz talk");
    }

    #[tokio::test]
    async fn test_rename_missing_chat_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let err = repo.rename_chat(&Uuid::now_v7(), "nope").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_chat_leaves_messages_behind() {
        let pool = test_pool().await;
        let user = make_user(&pool, "deleter").await;
        let repo = SqliteChatRepository::new(pool);

        let chat = Chat::new(user.id, None);
        repo.create_chat(&chat).await.unwrap();

        let user_msg = Message::new(chat.id, Sender::User, "hello".to_string());
        let bot_msg = Message::new(chat.id, Sender::Bot, "hi".to_string());
        repo.persist_turn(&user_msg, &bot_msg, None).await.unwrap();

        assert!(repo.delete_chat(&chat.id).await.unwrap());
        assert!(repo.list_chats(&user.id).await.unwrap().is_empty());

        // No cascade: the messages are orphaned but still retrievable.
        let messages = repo.get_messages(&chat.id).await.unwrap();
        assert_eq!(messages.len(), 2);

        // Deleting again is a no-op.
        assert!(!repo.delete_chat(&chat.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_messages_ordered_ascending() {
        let pool = test_pool().await;
        let user = make_user(&pool, "orderer").await;
        let repo = SqliteChatRepository::new(pool);

        let chat = Chat::new(user.id, None);
        repo.create_chat(&chat).await.unwrap();

        for i in 0..3 {
            let user_msg = Message::new(chat.id, Sender::User, format!("question {i}"));
            let bot_msg = Message::new(chat.id, Sender::Bot, format!("answer {i}"));
            repo.persist_turn(&user_msg, &bot_msg, None).await.unwrap();
        }

        let messages = repo.get_messages(&chat.id).await.unwrap();
        assert_eq!(messages.len(), 6);
        for (i, pair) in messages.chunks(2).enumerate() {
            assert_eq!(pair[0].sender, Sender::User);
            assert_eq!(pair[0].content, format!("question {i}"));
            assert_eq!(pair[1].sender, Sender::Bot);
            assert_eq!(pair[1].content, format!("answer {i}"));
        }
    }

    #[tokio::test]
    async fn test_persona_join() {
        let pool = test_pool().await;
        let user = make_user(&pool, "persona").await;
        let repo = SqliteChatRepository::new(pool);

        let chat = Chat::new(user.id, None);
        repo.create_chat(&chat).await.unwrap();

        let persona = repo.get_persona(&chat.id).await.unwrap().unwrap();
        assert_eq!(persona.user_id, user.id);
        assert_eq!(persona.name, "persona");
        assert_eq!(persona.personality, "neutral");
        assert!(persona.preferences.is_empty());

        assert!(repo.get_persona(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persist_turn_updates_preferences() {
        let pool = test_pool().await;
        let user = make_user(&pool, "jazzfan").await;
        let repo = SqliteChatRepository::new(pool);

        let chat = Chat::new(user.id, None);
        repo.create_chat(&chat).await.unwrap();

        let mut preferences = PreferenceMap::new();
        preferences.insert("updated".to_string(), "jazz".to_string());
        let user_msg = Message::new(chat.id, Sender::User, "I like jazz".to_string());
        let bot_msg = Message::new(chat.id, Sender::Bot, "Nice!".to_string());
        repo.persist_turn(&user_msg, &bot_msg, Some((&user.id, &preferences)))
            .await
            .unwrap();

        let persona = repo.get_persona(&chat.id).await.unwrap().unwrap();
        assert_eq!(persona.preferences.get("updated").unwrap(), "jazz");
        assert_eq!(repo.get_messages(&chat.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_persist_turn_is_atomic() {
        let pool = test_pool().await;
        let user = make_user(&pool, "atomic").await;
        let repo = SqliteChatRepository::new(pool);

        let chat = Chat::new(user.id, None);
        repo.create_chat(&chat).await.unwrap();

        // A bot message reusing the user message's id fails mid-transaction;
        // the user message and preference update must roll back with it.
        let mut preferences = PreferenceMap::new();
        preferences.insert("updated".to_string(), "tea".to_string());
        let user_msg = Message::new(chat.id, Sender::User, "my preference is tea".to_string());
        let mut bad_bot = Message::new(chat.id, Sender::Bot, "ok".to_string());
        bad_bot.id = user_msg.id; // primary key collision

        let err = repo
            .persist_turn(&user_msg, &bad_bot, Some((&user.id, &preferences)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));

        assert!(repo.get_messages(&chat.id).await.unwrap().is_empty());
        let persona = repo.get_persona(&chat.id).await.unwrap().unwrap();
        assert!(persona.preferences.is_empty());
    }
}
