//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, InMemoryUserStore, UserStore};
use crate::services::{UserManager, UserService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection, absent when running on the in-memory store
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, database: Option<Arc<Database>>) -> Self {
        Self {
            user_service,
            database,
        }
    }

    /// Wire the Postgres-backed store and Argon2 hashing.
    pub fn from_database(database: Arc<Database>) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        let user_service = Arc::new(UserManager::with_argon2(repo));

        Self::new(user_service, Some(database))
    }

    /// Wire a process-local store; data is lost on shutdown.
    pub fn in_memory(store: InMemoryUserStore) -> Self {
        let user_service = Arc::new(UserManager::with_argon2(Arc::new(store)));

        Self::new(user_service, None)
    }
}
