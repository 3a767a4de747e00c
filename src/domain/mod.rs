//! Core business entities, types and traits.

pub mod error;
pub mod user;

pub use error::{AuthError, AuthResult};
pub use user::{CreateUserDto, Role, RoleName, User, UserRepositoryInterface};
