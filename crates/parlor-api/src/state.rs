//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository/provider traits, but AppState pins
//! them to the concrete infra implementations. Everything is built once at
//! startup and passed explicitly into handlers -- no module-level singletons.

use std::sync::Arc;

use parlor_core::account::AccountService;
use parlor_core::chat::ChatService;
use parlor_core::turn::TurnEngine;
use parlor_infra::llm::openai_compat::{openai_defaults, OpenAiCompatibleProvider};
use parlor_infra::sqlite::chat::SqliteChatRepository;
use parlor_infra::sqlite::pool::DatabasePool;
use parlor_infra::sqlite::user::SqliteUserRepository;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAccountService = AccountService<SqliteUserRepository>;
pub type ConcreteChatService = ChatService<SqliteChatRepository>;
pub type ConcreteTurnEngine = TurnEngine<SqliteChatRepository, OpenAiCompatibleProvider>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<ConcreteAccountService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub turn_engine: Arc<ConcreteTurnEngine>,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire services.
    pub async fn init(
        database_url: &str,
        api_key: &str,
        base_url: &str,
        model: &str,
    ) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(database_url).await?;

        let account_service = AccountService::new(SqliteUserRepository::new(db_pool.clone()));
        let chat_service = ChatService::new(SqliteChatRepository::new(db_pool.clone()));

        // The turn engine owns its own repository instance alongside the
        // chat service's (repositories are cheap clones of the pool).
        let mut provider_config = openai_defaults(api_key);
        provider_config.base_url = base_url.to_string();
        let provider = OpenAiCompatibleProvider::new(provider_config);
        let turn_engine = TurnEngine::new(
            SqliteChatRepository::new(db_pool.clone()),
            provider,
            model.to_string(),
        );

        Ok(Self {
            account_service: Arc::new(account_service),
            chat_service: Arc::new(chat_service),
            turn_engine: Arc::new(turn_engine),
        })
    }
}
