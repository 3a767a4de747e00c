use async_trait::async_trait;

use super::{CreateUserDto, Role, RoleName, User};
use crate::domain::AuthResult;

/// Credential store interface: users, their role assignments, and the
/// role reference table.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn exists_by_username(&self, username: &str) -> AuthResult<bool>;
    async fn exists_by_email(&self, email: &str) -> AuthResult<bool>;

    /// Fetch a user together with their assigned roles.
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    async fn create_user(&self, dto: CreateUserDto) -> AuthResult<User>;

    /// Lookup in the pre-seeded role reference table.
    async fn find_role_by_name(&self, name: RoleName) -> AuthResult<Option<Role>>;

    async fn count_users(&self) -> AuthResult<u64>;
}
