//! User service - Handles user registration.
//!
//! Derives the credential, delegates the insert to the repository and
//! translates storage failures into client-facing errors.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Argon2Hasher, CreateUserParams, CredentialHasher, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{StoreError, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user from already-validated input.
    ///
    /// Fails with `AppError::Conflict` when the username is taken.
    async fn create_user(
        &self,
        username: String,
        password: String,
        full_name: String,
        email: String,
    ) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserManager {
    /// Create a user service with an explicit credential hasher
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Create a user service hashing with Argon2
    pub fn with_argon2(repo: Arc<dyn UserRepository>) -> Self {
        Self::new(repo, Arc::new(Argon2Hasher))
    }

    /// Argon2 is CPU-bound, so it runs on the blocking pool.
    async fn derive_credential(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::password_hash(format!("hashing task failed: {}", e)))??;

        Ok(hashed.into_string())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(
        &self,
        username: String,
        password: String,
        full_name: String,
        email: String,
    ) -> AppResult<User> {
        let hashed_password = self.derive_credential(password).await?;

        let params = CreateUserParams {
            username,
            hashed_password,
            full_name,
            email,
        };

        match self.repo.create(params).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "User created");
                Ok(user)
            }
            Err(StoreError::Conflict(key)) => {
                tracing::warn!(%key, "Rejected duplicate user");
                Err(AppError::Conflict(key))
            }
            Err(e) => Err(e.into()),
        }
    }
}
