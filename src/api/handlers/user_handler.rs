//! User handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::USERNAME_PATTERN;
use crate::domain::CreateUserResponse;
use crate::errors::{AppResult, ErrorResponse};

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(USERNAME_PATTERN).expect("username pattern is a valid regex"));

/// User creation request
#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Unique login name (letters and digits only)
    #[validate(regex(path = *USERNAME_REGEX, message = "must contain only letters and digits"))]
    #[schema(example = "alice01")]
    pub username: String,
    /// Plaintext password (minimum 6 characters)
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    /// Display name
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "Alice A")]
    pub full_name: String,
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Malformed or invalid request", body = ErrorResponse),
        (status = 403, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Hashing or storage failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Json<CreateUserResponse>> {
    let user = state
        .user_service
        .create_user(
            payload.username,
            payload.password,
            payload.full_name,
            payload.email,
        )
        .await?;

    Ok(Json(CreateUserResponse::from(user)))
}
