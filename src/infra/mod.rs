//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - User repositories (Postgres and in-memory)

pub mod db;
pub mod repositories;

pub use db::{Database, MigrationState, Migrator};
pub use repositories::{InMemoryUserStore, StoreError, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
