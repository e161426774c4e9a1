//! # Users API
//!
//! CRUD HTTP API for managing user records, backed by a relational
//! database through SeaORM and secured with JWT bearer authentication.
//!
//! ## Architecture
//!
//! - **domain**: Core entities, DTOs and repository traits
//! - **application**: The `UserService` interface and its database-backed
//!   implementation
//! - **infrastructure**: Database connection, entities, migrations and
//!   repository implementations
//! - **interfaces**: HTTP layer (axum router, handlers, extractors) with
//!   Swagger documentation
//! - **auth**: JWT token issuing and bearer authentication middleware

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::AppConfig;

// Re-export database helpers for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
