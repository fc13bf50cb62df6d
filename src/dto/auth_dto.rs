use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::user_dto::UserResponse;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1))]
    pub login: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}
