//! Application services

pub mod auth;
pub mod roles;

pub use auth::{AuthService, SignIn, SignupData};
pub use roles::resolve_roles;
