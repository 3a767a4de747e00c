//! Core authentication service: sign-in, sign-up, privileged search.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use super::roles::resolve_roles;
use crate::auth::jwt::{create_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::domain::{
    AuthError, AuthResult, CreateUserDto, RoleName, User, UserRepositoryInterface,
};

/// Profile and credential data collected at sign-up, with the optional
/// set of requested role strings ("admin"/"doctor"/anything).
#[derive(Debug, Clone)]
pub struct SignupData {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub address: String,
    pub pin: String,
    pub roles: Option<HashSet<String>>,
}

/// Successful sign-in: the issued token plus the persisted user record.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub token: String,
    pub user: User,
}

/// Orchestrates credential verification, token issuance, registration
/// and the admin-only search variants. Stateless beyond its
/// collaborators; no per-request shared mutable state.
pub struct AuthService {
    repo: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepositoryInterface>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    /// Verify credentials and issue a session token.
    ///
    /// A missing user and a wrong password are indistinguishable in the
    /// result, to avoid user enumeration.
    pub async fn sign_in(&self, username: &str, password: &str) -> AuthResult<SignIn> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            warn!(username, "sign-in failed: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        let password_valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !password_valid {
            warn!(username, "sign-in failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = create_token(&user.username, &self.jwt_config)?;
        info!(username, "sign-in succeeded");

        Ok(SignIn { token, user })
    }

    /// Register a new user. Each check short-circuits; no token is
    /// issued at sign-up.
    pub async fn sign_up(&self, data: SignupData) -> AuthResult<User> {
        if self.repo.exists_by_username(&data.username).await? {
            return Err(AuthError::UsernameTaken);
        }

        if self.repo.exists_by_email(&data.email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&data.password)?;

        let roles = resolve_roles(self.repo.as_ref(), data.roles.as_ref()).await?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                username: data.username,
                email: data.email,
                password_hash,
                first_name: data.first_name,
                last_name: data.last_name,
                mobile_number: data.mobile_number,
                address: data.address,
                pin: data.pin,
                roles,
            })
            .await?;

        info!(username = %user.username, roles = ?user.role_names(), "user registered");
        Ok(user)
    }

    /// Admin-only lookup of any user by username.
    pub async fn search_user(&self, username: &str) -> AuthResult<User> {
        self.search(username, None, "User").await
    }

    /// Admin-only lookup restricted to patients.
    pub async fn search_patient(&self, username: &str) -> AuthResult<User> {
        self.search(username, Some(RoleName::Patient), "Patient").await
    }

    /// Admin-only lookup restricted to doctors.
    pub async fn search_doctor(&self, username: &str) -> AuthResult<User> {
        self.search(username, Some(RoleName::Doctor), "Doctor").await
    }

    async fn search(
        &self,
        username: &str,
        required: Option<RoleName>,
        what: &'static str,
    ) -> AuthResult<User> {
        let not_found = || AuthError::UserNotFound {
            what,
            username: username.to_string(),
        };

        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or_else(not_found)?;

        // Any role other than the required one disqualifies the user,
        // so e.g. a {PATIENT, DOCTOR} user fails the patient search.
        if let Some(required) = required {
            if user.roles.iter().any(|r| r.name != required) {
                return Err(not_found());
            }
        }

        Ok(user)
    }
}
