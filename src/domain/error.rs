use thiserror::Error;

use super::user::RoleName;

/// Errors surfaced by the authentication flows.
///
/// Sign-in failures deliberately collapse into a single
/// `InvalidCredentials` variant so the response never reveals whether
/// the username or the password was wrong.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Error: Invalid credentials!")]
    InvalidCredentials,

    #[error("Error: Username is already taken!")]
    UsernameTaken,

    #[error("Error: Email is already in use!")]
    EmailTaken,

    /// Reference-data row for a role is missing. Seeding defect,
    /// not a user error.
    #[error("Error: Role is not found: {0}")]
    RoleNotFound(RoleName),

    #[error("{what} Not Found with username: {username}")]
    UserNotFound {
        what: &'static str,
        username: String,
    },

    #[error("Missing authentication token")]
    MissingToken,

    /// Well-formed but unusable token: wrong scheme, or a verified
    /// subject that no longer matches a persisted user.
    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Insufficient permissions: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hashing error: {0}")]
    Hash(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl From<sea_orm::DbErr> for AuthError {
    fn from(e: sea_orm::DbErr) -> Self {
        AuthError::Database(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AuthError::Hash(e.to_string())
    }
}
