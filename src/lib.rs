//! Simple Bank - user registration API.
//!
//! An axum service that validates a registration request, hashes the
//! password with Argon2, stores the user through SeaORM and returns a
//! public projection of the stored row.
//!
//! # Layers
//!
//! - **cli** / **commands**: `serve` and `migrate` subcommands
//! - **config**: environment configuration and constants
//! - **domain**: user entity, response projection, password hashing
//! - **services**: the user registration use case
//! - **infra**: database, migrations and user repositories
//! - **api**: handlers, extractors, routes and OpenAPI docs
//! - **errors**: centralized error type with HTTP mapping
//!
//! # CLI Usage
//!
//! ```bash
//! cargo run -- migrate up
//! cargo run -- serve
//! cargo run -- serve --in-memory
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{CreateUserResponse, Password, User};
pub use errors::{AppError, AppResult};
