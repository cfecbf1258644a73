//! UserRepository trait definition.

use parlor_types::error::RepositoryError;
use parlor_types::user::User;

/// Repository trait for user account persistence.
///
/// Implementations live in parlor-infra (e.g., `SqliteUserRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait UserRepository: Send + Sync {
    /// Insert a new user row.
    ///
    /// Returns `RepositoryError::Conflict` when the name is already taken
    /// (UNIQUE constraint on `users.name`).
    fn create_user(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Look up a user by exact display name (the login key).
    fn get_user_by_name(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
