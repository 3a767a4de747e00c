//! Admin-only user search handlers
//!
//! All three endpoints sit behind the JWT + admin middleware stack;
//! by the time a handler runs the caller is known to hold ROLE_ADMIN.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::MessageRequest;
use crate::application::AuthService;
use crate::domain::{AuthError, User};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

/// User search handler state
#[derive(Clone)]
pub struct UserSearchState {
    pub auth_service: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/api/auth/search",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = MessageRequest,
    responses(
        (status = 200, description = "User found", body = ApiResponse<User>),
        (status = 404, description = "User not found"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn search_user(
    State(state): State<UserSearchState>,
    ValidatedJson(request): ValidatedJson<MessageRequest>,
) -> Result<Json<ApiResponse<User>>, AuthError> {
    let user = state.auth_service.search_user(&request.message).await?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/patient/search",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Patient found", body = ApiResponse<User>),
        (status = 404, description = "Patient not found"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn search_patient(
    State(state): State<UserSearchState>,
    ValidatedJson(request): ValidatedJson<MessageRequest>,
) -> Result<Json<ApiResponse<User>>, AuthError> {
    let user = state.auth_service.search_patient(&request.message).await?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/doctor/search",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Doctor found", body = ApiResponse<User>),
        (status = 404, description = "Doctor not found"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn search_doctor(
    State(state): State<UserSearchState>,
    ValidatedJson(request): ValidatedJson<MessageRequest>,
) -> Result<Json<ApiResponse<User>>, AuthError> {
    let user = state.auth_service.search_doctor(&request.message).await?;
    Ok(Json(ApiResponse::success(user)))
}
