use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};

use crate::domain::{
    AuthError, AuthResult, CreateUserDto, Role, RoleName, User, UserRepositoryInterface,
};
use crate::infrastructure::database::entities::{role, user, user_role};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: match model.name {
            role::RoleName::Admin => RoleName::Admin,
            role::RoleName::Doctor => RoleName::Doctor,
            role::RoleName::Patient => RoleName::Patient,
        },
    }
}

fn domain_role_to_entity(name: RoleName) -> role::RoleName {
    match name {
        RoleName::Admin => role::RoleName::Admin,
        RoleName::Doctor => role::RoleName::Doctor,
        RoleName::Patient => role::RoleName::Patient,
    }
}

fn user_model_to_domain(model: user::Model, roles: Vec<role::Model>) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        first_name: model.first_name,
        last_name: model.last_name,
        mobile_number: model.mobile_number,
        address: model.address,
        pin: model.pin,
        roles: roles.into_iter().map(entity_role_to_domain).collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn exists_by_username(&self, username: &str) -> AuthResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .find_with_related(role::Entity)
            .all(&self.db)
            .await?;

        Ok(result
            .into_iter()
            .next()
            .map(|(model, roles)| user_model_to_domain(model, roles)))
    }

    async fn create_user(&self, dto: CreateUserDto) -> AuthResult<User> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let new_user = user::ActiveModel {
            id: Set(id.clone()),
            username: Set(dto.username.clone()),
            email: Set(dto.email.clone()),
            password_hash: Set(dto.password_hash.clone()),
            first_name: Set(dto.first_name.clone()),
            last_name: Set(dto.last_name.clone()),
            mobile_number: Set(dto.mobile_number.clone()),
            address: Set(dto.address.clone()),
            pin: Set(dto.pin.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The user row and its role assignments must land together:
        // a user without at least one role is an invalid record.
        let txn = self.db.begin().await?;

        let model = new_user.insert(&txn).await.map_err(|e| {
            // Unique constraints backstop the exists-then-insert race.
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("duplicate") {
                if msg.contains("email") {
                    AuthError::EmailTaken
                } else {
                    AuthError::UsernameTaken
                }
            } else {
                AuthError::from(e)
            }
        })?;

        for r in &dto.roles {
            let assignment = user_role::ActiveModel {
                user_id: Set(id.clone()),
                role_id: Set(r.id),
            };
            // Composite-key join rows have no generated id to return.
            user_role::Entity::insert(assignment)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        let mut user = user_model_to_domain(model, Vec::new());
        user.roles = dto.roles;
        Ok(user)
    }

    async fn find_role_by_name(&self, name: RoleName) -> AuthResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(domain_role_to_entity(name)))
            .one(&self.db)
            .await?;
        Ok(model.map(entity_role_to_domain))
    }

    async fn count_users(&self) -> AuthResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm_migration::MigratorTrait;

    async fn test_repo() -> UserRepository {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        UserRepository::new(db)
    }

    fn dto(username: &str, email: &str, roles: Vec<Role>) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            mobile_number: "1234567890".to_string(),
            address: "1 Main St".to_string(),
            pin: "560001".to_string(),
            roles,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_with_roles() {
        let repo = test_repo().await;
        let patient = repo
            .find_role_by_name(RoleName::Patient)
            .await
            .unwrap()
            .unwrap();

        repo.create_user(dto("alice", "alice@example.com", vec![patient]))
            .await
            .unwrap();

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found.role_names(), vec!["ROLE_PATIENT"]);
        assert!(repo.exists_by_username("alice").await.unwrap());
        assert!(repo.exists_by_email("alice@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_role_assignment_leaves_no_user_row() {
        let repo = test_repo().await;

        // A role id absent from the reference table makes the
        // assignment insert fail; the user insert must roll back with
        // it, or a role-less user would persist and consume the
        // username forever.
        let bogus_role = Role {
            id: 999,
            name: RoleName::Patient,
        };
        let result = repo
            .create_user(dto("ghost", "ghost@example.com", vec![bogus_role]))
            .await;
        assert!(result.is_err());

        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
        assert!(!repo.exists_by_username("ghost").await.unwrap());
        assert!(!repo.exists_by_email("ghost@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_unique_violations_name_the_right_field() {
        let repo = test_repo().await;
        let patient = repo
            .find_role_by_name(RoleName::Patient)
            .await
            .unwrap()
            .unwrap();

        repo.create_user(dto("alice", "alice@example.com", vec![patient.clone()]))
            .await
            .unwrap();

        let err = repo
            .create_user(dto("alice", "fresh@example.com", vec![patient.clone()]))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));

        let err = repo
            .create_user(dto("bob", "alice@example.com", vec![patient]))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }
}
