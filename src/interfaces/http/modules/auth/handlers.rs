//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{JwtResponse, LoginRequest, MessageResponse, SignupRequest};
use crate::application::{AuthService, SignupData};
use crate::domain::AuthError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth_service: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful sign-in", body = ApiResponse<JwtResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn signin(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<JwtResponse>>, AuthError> {
    let signed_in = state
        .auth_service
        .sign_in(&request.username, &request.password)
        .await?;

    let user = signed_in.user;
    let response = JwtResponse {
        token: signed_in.token,
        token_type: "Bearer".to_string(),
        id: user.id.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        roles: user.role_names(),
        user,
    };

    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Username or email already in use"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), AuthError> {
    let user = state
        .auth_service
        .sign_up(SignupData {
            username: request.username,
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            mobile_number: request.mobile_number,
            address: request.address,
            pin: request.pin,
            roles: request.role,
        })
        .await?;

    let response = MessageResponse {
        message: format!(
            "User registered successfully! Username : {}",
            user.username
        ),
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))))
}
