//! User repository: the storage collaborator for user creation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};
use thiserror::Error;

use super::entities::user::{ActiveModel, Entity as UserEntity};
use crate::domain::{password_never_changed, CreateUserParams, User};
use crate::errors::AppError;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Classified storage failure.
///
/// Driver error codes are resolved inside the store; callers only see
/// `Conflict` or `Other`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A row with the same identifying key already exists
    #[error("{0} already exists")]
    Conflict(String),

    /// Any other storage fault (connectivity, other constraints, timeouts)
    #[error("storage failure: {0}")]
    Other(#[from] DbErr),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(key) => AppError::Conflict(key),
            StoreError::Other(e) => AppError::Database(e),
        }
    }
}

/// Map a failed insert to `Conflict` when the database reports a unique violation.
pub(crate) fn classify_insert_error(err: DbErr, username: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            StoreError::Conflict(format!("username {}", username))
        }
        _ => StoreError::Other(err),
    }
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a single user row; the username must not exist yet
    async fn create(&self, params: CreateUserParams) -> Result<User, StoreError>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Postgres-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, params: CreateUserParams) -> Result<User, StoreError> {
        let username = params.username.clone();
        let active_model = ActiveModel {
            username: Set(params.username),
            hashed_password: Set(params.hashed_password),
            full_name: Set(params.full_name),
            email: Set(params.email),
            password_changed_at: Set(password_never_changed()),
            created_at: Set(Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| classify_insert_error(e, &username))?;

        Ok(User::from(model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let model = UserEntity::find_by_id(username.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_error_is_other() {
        let err = classify_insert_error(DbErr::Custom("connection reset".into()), "alice01");
        assert!(matches!(err, StoreError::Other(_)));
    }

    #[test]
    fn test_record_not_inserted_is_other() {
        let err = classify_insert_error(DbErr::RecordNotInserted, "alice01");
        assert!(matches!(err, StoreError::Other(_)));
    }

    #[test]
    fn test_store_error_maps_to_app_error() {
        let conflict = AppError::from(StoreError::Conflict("username alice01".into()));
        assert!(matches!(conflict, AppError::Conflict(ref key) if key == "username alice01"));

        let other = AppError::from(StoreError::Other(DbErr::Custom("boom".into())));
        assert!(matches!(other, AppError::Database(_)));
    }
}
