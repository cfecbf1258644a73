//! Chat-turn orchestration.
//!
//! One turn: join the chat to its owning user, fetch the full history,
//! build the system prompt, call the completion provider once, run the
//! preference heuristic, and persist the (user, bot) message pair plus any
//! preference update atomically.

use parlor_types::chat::{Message, Sender};
use parlor_types::error::{RepositoryError, TurnError};
use parlor_types::llm::CompletionRequest;
use parlor_types::user::PreferenceMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::llm::provider::LlmProvider;
use crate::repository::chat::ChatRepository;
use crate::turn::preferences::{extract_preference, UPDATED_KEY};
use crate::turn::prompt::build_system_prompt;

/// Result of one chat turn: the bot reply and the (possibly updated)
/// preference mapping.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub preferences: PreferenceMap,
}

/// Runs chat turns against a `ChatRepository` and an `LlmProvider`.
///
/// Generic over both ports so the engine can be exercised in tests with
/// in-memory fakes. The model identifier is fixed at construction.
pub struct TurnEngine<C: ChatRepository, P: LlmProvider> {
    chat_repo: C,
    provider: P,
    model: String,
}

impl<C: ChatRepository, P: LlmProvider> TurnEngine<C, P> {
    /// Create a new turn engine with the given repository, provider, and
    /// model identifier.
    pub fn new(chat_repo: C, provider: P, model: String) -> Self {
        Self {
            chat_repo,
            provider,
            model,
        }
    }

    /// Run one chat turn.
    ///
    /// The provider call happens before any write, so a provider failure
    /// aborts the turn with nothing persisted. The writes themselves run in
    /// a single transaction inside `persist_turn`.
    pub async fn run(&self, chat_id: Uuid, message: String) -> Result<TurnOutcome, TurnError> {
        let persona = self
            .chat_repo
            .get_persona(&chat_id)
            .await
            .map_err(storage)?
            .ok_or(TurnError::ChatNotFound)?;

        let history = self.chat_repo.get_messages(&chat_id).await.map_err(storage)?;
        let system = build_system_prompt(&persona, &history);
        debug!(chat_id = %chat_id, history_len = history.len(), "System prompt assembled");

        let request = CompletionRequest::chat_turn(self.model.clone(), system, message.clone());
        let response = self.provider.complete(&request).await?;
        let reply = response.content;

        let mut preferences = persona.preferences;
        let stated = extract_preference(&message);
        if let Some(value) = &stated {
            preferences.insert(UPDATED_KEY.to_string(), value.clone());
        }

        let user_message = Message::new(chat_id, Sender::User, message);
        let bot_message = Message::new(chat_id, Sender::Bot, reply.clone());
        self.chat_repo
            .persist_turn(
                &user_message,
                &bot_message,
                stated.as_ref().map(|_| (&persona.user_id, &preferences)),
            )
            .await
            .map_err(storage)?;

        info!(
            chat_id = %chat_id,
            provider = self.provider.name(),
            preference_updated = stated.is_some(),
            "Chat turn completed"
        );

        Ok(TurnOutcome { reply, preferences })
    }
}

fn storage(e: RepositoryError) -> TurnError {
    TurnError::Storage(e.to_string())
}
