//! User domain entity and related types.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Timestamp stored for users whose password has never been changed.
pub fn password_never_changed() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// User domain entity as persisted by the storage layer
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
    pub password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("hashed_password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_changed_at", &self.password_changed_at)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Arguments for inserting a new user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserParams {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
}

/// Public projection of a created user (safe to return to client).
///
/// Has no credential field, so the hashed password cannot be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    #[schema(example = "alice01")]
    pub username: String,
    #[schema(example = "Alice A")]
    pub full_name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Last password change; `0001-01-01T00:00:00Z` when never changed
    #[serde(alias = "passworad_changed_at")]
    pub password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for CreateUserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            password_changed_at: user.password_changed_at,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            username: "alice01".to_string(),
            hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            full_name: "Alice A".to_string(),
            email: "alice@example.com".to_string(),
            password_changed_at: password_never_changed(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_response_omits_credential() {
        let user = sample_user();
        let json = serde_json::to_value(CreateUserResponse::from(user.clone())).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert_eq!(object["username"], "alice01");
        assert_eq!(object["full_name"], "Alice A");
        assert_eq!(object["email"], "alice@example.com");
        assert!(object.contains_key("password_changed_at"));
        assert!(object.contains_key("created_at"));
        assert!(!json.to_string().contains(&user.hashed_password));
    }

    #[test]
    fn test_response_accepts_legacy_field_name() {
        let json = serde_json::json!({
            "username": "alice01",
            "full_name": "Alice A",
            "email": "alice@example.com",
            "passworad_changed_at": "0001-01-01T00:00:00Z",
            "created_at": "2024-01-01T00:00:00Z",
        });

        let response: CreateUserResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.password_changed_at, password_never_changed());
    }

    #[test]
    fn test_debug_is_redacted() {
        let rendered = format!("{:?}", sample_user());
        assert!(!rendered.contains("argon2"));
    }
}
