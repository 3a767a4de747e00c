//! In-memory credential store for development and testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    AuthResult, CreateUserDto, Role, RoleName, User, UserRepositoryInterface,
};

/// In-memory user store. Roles are pre-seeded the way the SQL
/// migration seeds them, so role resolution behaves identically.
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
    roles: DashMap<RoleName, Role>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        let store = Self {
            users: DashMap::new(),
            roles: DashMap::new(),
        };

        for (id, name) in [
            (1, RoleName::Admin),
            (2, RoleName::Doctor),
            (3, RoleName::Patient),
        ] {
            store.roles.insert(name, Role { id, name });
        }

        store
    }

    /// A store with an empty role table, for exercising the
    /// missing-reference-data path.
    pub fn without_seeded_roles() -> Self {
        Self {
            users: DashMap::new(),
            roles: DashMap::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn exists_by_username(&self, username: &str) -> AuthResult<bool> {
        Ok(self.users.contains_key(username))
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        Ok(self.users.iter().any(|u| u.value().email == email))
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }

    async fn create_user(&self, dto: CreateUserDto) -> AuthResult<User> {
        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: dto.username.clone(),
            email: dto.email,
            password_hash: dto.password_hash,
            first_name: dto.first_name,
            last_name: dto.last_name,
            mobile_number: dto.mobile_number,
            address: dto.address,
            pin: dto.pin,
            roles: dto.roles,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(dto.username, user.clone());
        Ok(user)
    }

    async fn find_role_by_name(&self, name: RoleName) -> AuthResult<Option<Role>> {
        Ok(self.roles.get(&name).map(|r| r.value().clone()))
    }

    async fn count_users(&self) -> AuthResult<u64> {
        Ok(self.users.len() as u64)
    }
}
