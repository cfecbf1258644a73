//! Account service for registration and login.
//!
//! There is no password or session mechanism: login is a name lookup and
//! identity is asserted by the client-supplied name. This is the documented
//! prototype identity model, preserved deliberately.

use parlor_types::error::{AccountError, RepositoryError};
use parlor_types::user::User;
use tracing::info;

use crate::repository::user::UserRepository;

/// Registration and login over a `UserRepository`.
///
/// Generic over the repository trait to maintain clean architecture
/// (parlor-core never depends on parlor-infra).
pub struct AccountService<U: UserRepository> {
    user_repo: U,
}

impl<U: UserRepository> AccountService<U> {
    /// Create a new account service with the given repository.
    pub fn new(user_repo: U) -> Self {
        Self { user_repo }
    }

    /// Register a new user.
    ///
    /// Personality defaults to "neutral" when omitted; preferences start
    /// empty. A duplicate name maps to `AccountError::NameTaken`.
    pub async fn register(
        &self,
        name: String,
        personality: Option<String>,
    ) -> Result<User, AccountError> {
        let user = User::new(name, personality);
        let created = self.user_repo.create_user(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AccountError::NameTaken(user.name.clone()),
            other => AccountError::StorageError(other.to_string()),
        })?;

        info!(user_id = %created.id, name = %created.name, "User registered");
        Ok(created)
    }

    /// Log in by exact name match.
    ///
    /// Returns `AccountError::NotFound` when no such user exists (the HTTP
    /// layer maps this to 401).
    pub async fn login(&self, name: &str) -> Result<User, AccountError> {
        self.user_repo
            .get_user_by_name(name)
            .await
            .map_err(|e| AccountError::StorageError(e.to_string()))?
            .ok_or(AccountError::NotFound)
    }
}
