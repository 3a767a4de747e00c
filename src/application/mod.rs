//! Business logic and use cases.

pub mod services;

pub use services::{resolve_roles, AuthService, SignIn, SignupData};
