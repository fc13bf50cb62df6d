use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::client_dto::{CreateClientPayload, UpdateClientPayload},
    error::Result,
    models::{client::Client, user::User},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Client created", body = Json<Client>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller lacks the create permission")
    )
)]
#[axum::debug_handler]
pub async fn create_client(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let client = state.client_service.create(payload, &caller).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    responses(
        (status = 200, description = "Current clients (no departure date)", body = Json<Vec<Client>>),
        (status = 403, description = "Caller lacks the view permission")
    )
)]
#[axum::debug_handler]
pub async fn list_clients(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
) -> Result<impl IntoResponse> {
    let clients = state.client_service.list_current(&caller).await?;
    Ok(Json(clients))
}

#[utoipa::path(
    get,
    path = "/api/clients/former",
    responses(
        (status = 200, description = "Former clients (departure date on record)", body = Json<Vec<Client>>),
        (status = 403, description = "Caller lacks the view permission")
    )
)]
#[axum::debug_handler]
pub async fn list_former_clients(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
) -> Result<impl IntoResponse> {
    let clients = state.client_service.list_former(&caller).await?;
    Ok(Json(clients))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found", body = Json<Client>),
        (status = 403, description = "Caller lacks the view permission"),
        (status = 404, description = "Client not found")
    )
)]
#[axum::debug_handler]
pub async fn get_client(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let client = state.client_service.get_by_id(id, &caller).await?;
    Ok(Json(client))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client ID")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Client updated", body = Json<Client>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller lacks the edit permission"),
        (status = 404, description = "Client not found")
    )
)]
#[axum::debug_handler]
pub async fn update_client(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let client = state.client_service.update(id, payload, &caller).await?;
    Ok(Json(client))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 403, description = "Caller lacks the delete permission"),
        (status = 404, description = "Client not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_client(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.client_service.delete(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
