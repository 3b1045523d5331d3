//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod password;
pub mod user;

pub use password::{Argon2Hasher, CredentialHasher, Password};
pub use user::{password_never_changed, CreateUserParams, CreateUserResponse, User};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockCredentialHasher;
