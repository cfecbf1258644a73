//! SQLite user repository implementation.
//!
//! Implements `UserRepository` from `parlor-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, RFC 3339 datetimes,
//! preferences stored as a JSON text column.

use chrono::{DateTime, Utc};
use parlor_core::repository::user::UserRepository;
use parlor_types::error::RepositoryError;
use parlor_types::user::{PreferenceMap, User};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain User.
struct UserRow {
    id: String,
    name: String,
    personality: String,
    preferences: String,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            personality: row.try_get("personality")?,
            preferences: row.try_get("preferences")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;
        let preferences = parse_preferences(&self.preferences)?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(User {
            id,
            name: self.name,
            personality: self.personality,
            preferences,
            created_at,
        })
    }
}

pub(crate) fn parse_preferences(json: &str) -> Result<PreferenceMap, RepositoryError> {
    serde_json::from_str(json)
        .map_err(|e| RepositoryError::Query(format!("invalid preferences json: {e}")))
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        let preferences_json = serde_json::to_string(&user.preferences)
            .map_err(|e| RepositoryError::Query(format!("serialize preferences: {e}")))?;

        let result = sqlx::query(
            r#"INSERT INTO users (id, name, personality, preferences, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.personality)
        .bind(preferences_json)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(user.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("name '{}' already exists", user.name)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_user_by_name(&self, name: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let user_row =
                    UserRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_login_lookup() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        let user = User::new("ada".to_string(), Some("curious".to_string()));
        let created = repo.create_user(&user).await.unwrap();
        assert_eq!(created.name, "ada");

        let found = repo.get_user_by_name("ada").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.personality, "curious");
        assert!(found.preferences.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_name_is_none() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        let found = repo.get_user_by_name("nobody").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        let first = User::new("taken".to_string(), None);
        repo.create_user(&first).await.unwrap();

        let second = User::new("taken".to_string(), None);
        let err = repo.create_user(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_preferences_roundtrip_through_json_column() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        let mut user = User::new("pref".to_string(), None);
        user.preferences
            .insert("updated".to_string(), "jazz".to_string());
        repo.create_user(&user).await.unwrap();

        let found = repo.get_user_by_name("pref").await.unwrap().unwrap();
        assert_eq!(found.preferences.get("updated").unwrap(), "jazz");
    }
}
