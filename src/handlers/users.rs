// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::user::User,
};

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    params(("x-tenant-id" = Uuid, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Usuário autenticado", body = User),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> impl IntoResponse {
    (StatusCode::OK, Json(user))
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(("x-tenant-id" = Uuid, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Usuários visíveis para quem pergunta", body = [User])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .lead_service
        .list_users(&actor)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(users)))
}

// GET /api/users/assignable
#[utoipa::path(
    get,
    path = "/api/users/assignable",
    tag = "Users",
    params(("x-tenant-id" = Uuid, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Representantes que podem receber leads deste usuário", body = [User])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_assignable_users(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .lead_service
        .assignable_users(&actor)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(users)))
}
