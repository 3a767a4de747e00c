//! User search DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Search request: `message` carries the target username.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MessageRequest {
    #[validate(length(min = 1, max = 50, message = "username is required"))]
    pub message: String,
}
