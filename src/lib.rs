//! # HM Auth Service
//!
//! Authentication backend for a hospital-management application:
//! credential verification, JWT session token issuance, role
//! assignment at registration, and admin-only user lookup.
//!
//! ## Architecture
//!
//! - **domain**: Core entities (User, Role), error taxonomy, and the
//!   credential-store trait
//! - **application**: AuthService orchestration and role resolution
//! - **auth**: JWT issuance/validation, bcrypt hashing, axum middleware
//! - **infrastructure**: SeaORM persistence, migrations, in-memory store
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, UserRepository};

// Re-export API router
pub use interfaces::create_api_router;
