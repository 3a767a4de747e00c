//! Authentication DTOs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::User;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3–50 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 20, message = "mobile number is required"))]
    pub mobile_number: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 10, message = "pin is required"))]
    pub pin: String,
    /// Requested role strings ("admin"/"doctor"; anything else maps to
    /// the default patient role). Absent means default.
    pub role: Option<HashSet<String>>,
}

/// Successful sign-in response
#[derive(Debug, Serialize, ToSchema)]
pub struct JwtResponse {
    pub token: String,
    pub token_type: String,
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
