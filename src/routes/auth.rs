use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, TokenResponse},
    dto::user_dto::UserResponse,
    error::Result,
    models::user::User,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated", body = Json<TokenResponse>),
        (status = 401, description = "Bad credentials or inactive account")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (access_token, user) = state
        .auth_service
        .login(&payload.login, &payload.password)
        .await?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: UserResponse::from(user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Caller profile", body = Json<UserResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn me(Extension(caller): Extension<User>) -> Result<impl IntoResponse> {
    Ok(Json(UserResponse::from(caller)))
}
