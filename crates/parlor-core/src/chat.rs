//! Chat service covering thread lifecycle and message retrieval.

use parlor_types::chat::{Chat, Message};
use parlor_types::error::{ChatError, RepositoryError};
use parlor_types::user::ChatPersona;
use tracing::info;
use uuid::Uuid;

use crate::repository::chat::ChatRepository;

/// Thread lifecycle (create/rename/delete/list) and message retrieval over
/// a `ChatRepository`.
pub struct ChatService<C: ChatRepository> {
    chat_repo: C,
}

impl<C: ChatRepository> ChatService<C> {
    /// Create a new chat service with the given repository.
    pub fn new(chat_repo: C) -> Self {
        Self { chat_repo }
    }

    /// Create a chat thread for a user. Title defaults to "New Chat".
    ///
    /// The user reference is validated by the foreign key at insert time
    /// only; it is never re-validated later.
    pub async fn create_chat(
        &self,
        user_id: Uuid,
        title: Option<String>,
    ) -> Result<Chat, ChatError> {
        let chat = Chat::new(user_id, title);
        let created = self
            .chat_repo
            .create_chat(&chat)
            .await
            .map_err(|e| ChatError::StorageError(e.to_string()))?;

        info!(chat_id = %created.id, user_id = %created.user_id, "Chat created");
        Ok(created)
    }

    /// Rename a chat, returning the updated row. 404s when the chat is gone.
    pub async fn rename_chat(&self, chat_id: &Uuid, title: &str) -> Result<Chat, ChatError> {
        self.chat_repo
            .rename_chat(chat_id, title)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ChatError::NotFound,
                other => ChatError::StorageError(other.to_string()),
            })
    }

    /// Delete a chat thread. Idempotent: returns whether a row was removed.
    ///
    /// Messages are left behind on purpose (no cascade); they remain
    /// retrievable by chat id.
    pub async fn delete_chat(&self, chat_id: &Uuid) -> Result<bool, ChatError> {
        let removed = self
            .chat_repo
            .delete_chat(chat_id)
            .await
            .map_err(|e| ChatError::StorageError(e.to_string()))?;
        if removed {
            info!(chat_id = %chat_id, "Chat deleted");
        }
        Ok(removed)
    }

    /// List a user's chats, newest first.
    pub async fn list_chats(&self, user_id: &Uuid) -> Result<Vec<Chat>, ChatError> {
        self.chat_repo
            .list_chats(user_id)
            .await
            .map_err(|e| ChatError::StorageError(e.to_string()))
    }

    /// All messages for a chat, timestamp ascending. No pagination.
    pub async fn get_messages(&self, chat_id: &Uuid) -> Result<Vec<Message>, ChatError> {
        self.chat_repo
            .get_messages(chat_id)
            .await
            .map_err(|e| ChatError::StorageError(e.to_string()))
    }

    /// The owning user's name, personality, and preferences for a chat.
    pub async fn get_persona(&self, chat_id: &Uuid) -> Result<ChatPersona, ChatError> {
        self.chat_repo
            .get_persona(chat_id)
            .await
            .map_err(|e| ChatError::StorageError(e.to_string()))?
            .ok_or(ChatError::NotFound)
    }
}
