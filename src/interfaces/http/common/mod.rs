//! Common HTTP API types

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::AuthError;

/// Standard API response envelope
///
/// All REST endpoints return data in this wrapper.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload. `null` on failure
    pub data: Option<T>,
    /// Error description. `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AuthError::UsernameTaken | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            AuthError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AuthError::RoleNotFound(_)
            | AuthError::TokenIssuance(_)
            | AuthError::Database(_)
            | AuthError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("internal error: {}", self);
        }
        let body = Json(ApiResponse::<()>::error(self.to_string()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_omits_data() {
        let resp = ApiResponse::<()>::error("boom");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::UsernameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::UserNotFound {
                what: "Patient",
                username: "x".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::RoleNotFound(crate::domain::RoleName::Patient).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
