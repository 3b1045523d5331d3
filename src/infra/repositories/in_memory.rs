use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::user_repository::{StoreError, UserRepository};
use crate::domain::{password_never_changed, CreateUserParams, User};

/// Process-local user store keyed by username.
///
/// Check-and-insert happens under one write lock, so concurrent creates of
/// the same username resolve to exactly one winner.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, params: CreateUserParams) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        match users.entry(params.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "username {}",
                params.username
            ))),
            Entry::Vacant(slot) => {
                let user = User {
                    username: params.username,
                    hashed_password: params.hashed_password,
                    full_name: params.full_name,
                    email: params.email,
                    password_changed_at: password_never_changed(),
                    created_at: Utc::now(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }
}
