//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::CreateUserResponse;
use crate::errors::{ErrorBody, ErrorResponse};

/// OpenAPI documentation for the Simple Bank API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Simple Bank",
        version = "0.1.0",
        description = "Banking REST API: user registration",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(user_handler::create_user),
    components(
        schemas(
            user_handler::CreateUserRequest,
            CreateUserResponse,
            ErrorResponse,
            ErrorBody,
        )
    ),
    tags(
        (name = "Users", description = "User registration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_create_user() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();

        let post = &json["paths"]["/users"]["post"];
        assert!(post.is_object());
        for status in ["200", "400", "403", "500"] {
            assert!(post["responses"][status].is_object(), "missing {}", status);
        }

        let schemas = &json["components"]["schemas"];
        assert!(schemas["CreateUserResponse"]["properties"]["hashed_password"].is_null());
        assert!(schemas["CreateUserRequest"]["properties"]["password"].is_object());
    }
}
