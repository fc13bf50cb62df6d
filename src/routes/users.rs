use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{CreateUserPayload, UpdateUserPayload, UserResponse},
    error::Result,
    models::user::User,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created", body = Json<UserResponse>),
        (status = 400, description = "Invalid payload or duplicate login"),
        (status = 403, description = "Caller is not an administrator")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.create(payload, &caller).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users, hashes stripped", body = Json<Vec<UserResponse>>),
        (status = 403, description = "Caller is not an administrator")
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
) -> Result<impl IntoResponse> {
    let users = state.user_service.list(&caller).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(users))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "User updated", body = Json<UserResponse>),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.update(id, payload, &caller).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Attempted self-deletion"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
