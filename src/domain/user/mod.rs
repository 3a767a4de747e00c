//! User aggregate
//!
//! Contains the User and Role models, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateUserDto;
pub use model::{Role, RoleName, User};
pub use repository::UserRepositoryInterface;
