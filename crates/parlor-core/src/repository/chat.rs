//! ChatRepository trait definition.
//!
//! Provides CRUD operations for chat threads and messages, the chat -> user
//! join used by the turn engine, and the atomic turn persistence operation.
//! Follows the same RPITIT pattern as `UserRepository`.

use parlor_types::chat::{Chat, Message};
use parlor_types::error::RepositoryError;
use parlor_types::user::{ChatPersona, PreferenceMap};
use uuid::Uuid;

/// Repository trait for chat thread and message persistence.
///
/// Implementations live in parlor-infra (e.g., `SqliteChatRepository`).
pub trait ChatRepository: Send + Sync {
    /// Insert a new chat thread.
    fn create_chat(
        &self,
        chat: &Chat,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Update a chat's title, returning the updated row.
    ///
    /// Returns `RepositoryError::NotFound` when the chat does not exist.
    fn rename_chat(
        &self,
        chat_id: &Uuid,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Delete a chat thread by id, returning whether a row was removed.
    ///
    /// Messages are deliberately NOT removed: the schema carries no foreign
    /// key from messages to chats, so orphaned messages stay retrievable.
    fn delete_chat(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// List chats for a user, ordered by created_at DESC (newest first).
    fn list_chats(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Get all messages for a chat, ordered by timestamp ASC.
    fn get_messages(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Join a chat to its owning user, yielding the persona data the turn
    /// engine needs (name, personality, preferences).
    ///
    /// Returns `Ok(None)` when the chat has no associated user row.
    fn get_persona(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatPersona>, RepositoryError>> + Send;

    /// Atomically persist a completed chat turn: the user message, the bot
    /// reply, and (when the turn stated a preference) the updated preference
    /// mapping on the owning user. All writes run in one transaction so a
    /// failure leaves nothing behind.
    fn persist_turn(
        &self,
        user_message: &Message,
        bot_message: &Message,
        preference_update: Option<(&Uuid, &PreferenceMap)>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
