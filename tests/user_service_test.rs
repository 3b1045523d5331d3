//! User service tests.
//!
//! Collaborators are mocked so each test can assert exactly which storage
//! calls happen (or do not happen) for a given input.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use sea_orm::DbErr;

use simplebank::domain::{
    password_never_changed, CreateUserParams, CredentialHasher, Password, User,
};
use simplebank::errors::{AppError, AppResult};
use simplebank::infra::{StoreError, UserRepository};
use simplebank::services::{UserManager, UserService};

mock! {
    Repo {}

    #[async_trait]
    impl UserRepository for Repo {
        async fn create(&self, params: CreateUserParams) -> Result<User, StoreError>;
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    }
}

mock! {
    Hasher {}

    impl CredentialHasher for Hasher {
        fn hash(&self, plain_text: &str) -> AppResult<Password>;
    }
}

fn stored_user(params: CreateUserParams) -> User {
    User {
        username: params.username,
        hashed_password: params.hashed_password,
        full_name: params.full_name,
        email: params.email,
        password_changed_at: password_never_changed(),
        created_at: Utc::now(),
    }
}

fn fixed_hasher() -> MockHasher {
    let mut hasher = MockHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(Password::from_hash("$argon2id$fixed".to_string())));
    hasher
}

async fn create_alice(service: &UserManager) -> AppResult<User> {
    service
        .create_user(
            "alice01".to_string(),
            "secret1".to_string(),
            "Alice A".to_string(),
            "alice@example.com".to_string(),
        )
        .await
}

#[tokio::test]
async fn test_create_user_persists_hashed_credential() {
    let mut repo = MockRepo::new();
    repo.expect_create()
        .withf(|p| {
            p.username == "alice01"
                && p.hashed_password == "$argon2id$fixed"
                && p.full_name == "Alice A"
                && p.email == "alice@example.com"
        })
        .times(1)
        .returning(|p| Ok(stored_user(p)));

    let service = UserManager::new(Arc::new(repo), Arc::new(fixed_hasher()));
    let user = create_alice(&service).await.unwrap();

    assert_eq!(user.username, "alice01");
    assert_ne!(user.hashed_password, "secret1");
    assert_eq!(user.password_changed_at, password_never_changed());
}

#[tokio::test]
async fn test_create_user_with_real_hasher_stores_verifiable_hash() {
    let mut repo = MockRepo::new();
    repo.expect_create().returning(|p| Ok(stored_user(p)));

    let service = UserManager::with_argon2(Arc::new(repo));
    let user = create_alice(&service).await.unwrap();

    assert!(user.hashed_password.starts_with("$argon2"));
    assert!(Password::from_hash(user.hashed_password).verify("secret1"));
}

#[tokio::test]
async fn test_hash_failure_skips_persistence() {
    let mut hasher = MockHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Err(AppError::password_hash("rng unavailable")));

    let mut repo = MockRepo::new();
    repo.expect_create().never();

    let service = UserManager::new(Arc::new(repo), Arc::new(hasher));
    let err = create_alice(&service).await.unwrap_err();

    assert!(matches!(err, AppError::PasswordHash(_)));
}

#[tokio::test]
async fn test_duplicate_username_becomes_conflict() {
    let mut repo = MockRepo::new();
    repo.expect_create()
        .times(1)
        .returning(|_| Err(StoreError::Conflict("username alice01".to_string())));

    let service = UserManager::new(Arc::new(repo), Arc::new(fixed_hasher()));
    let err = create_alice(&service).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref key) if key == "username alice01"));
    assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_other_storage_failure_becomes_database_error() {
    let mut repo = MockRepo::new();
    repo.expect_create()
        .returning(|_| Err(StoreError::Other(DbErr::Custom("connection reset".to_string()))));

    let service = UserManager::new(Arc::new(repo), Arc::new(fixed_hasher()));
    let err = create_alice(&service).await.unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.code(), "DATABASE_ERROR");
}
