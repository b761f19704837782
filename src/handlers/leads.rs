// src/handlers/leads.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        analysis::{LeadWithAnalysis, LocalizedAnalysis},
        bulk::{
            BulkAssignPayload, BulkAssignReport, BulkDeletePayload, BulkDeleteReport,
            BulkMessagePayload, BulkMessageReport, UpdateLeadStatusPayload,
        },
        lead::{Lead, LeadFilter, LeadPage, LeadStatus, DEFAULT_PER_PAGE, MAX_PER_PAGE},
    },
};

// =============================================================================
//  LISTAGEM
// =============================================================================

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListLeadsQuery {
    pub status: Option<LeadStatus>,

    /// Busca em nome, telefone e email
    #[validate(length(max = 100, message = "search_too_long"))]
    pub search: Option<String>,

    pub assigned_to: Option<Uuid>,

    #[validate(range(min = 1, message = "invalid_page"))]
    #[param(minimum = 1, example = 1)]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "invalid_page_size"))]
    #[param(minimum = 1, maximum = 100, example = 25)]
    pub per_page: Option<u32>,
}

impl From<ListLeadsQuery> for LeadFilter {
    fn from(query: ListLeadsQuery) -> Self {
        LeadFilter {
            status: query.status,
            search: query.search,
            assigned_to: query.assigned_to,
            page: query.page.unwrap_or(1),
            per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE).min(MAX_PER_PAGE),
        }
    }
}

// GET /api/leads
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    params(
        ListLeadsQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Página de leads visíveis, cada um com sua análise", body = LeadPage<LeadWithAnalysis>),
        (status = 400, description = "Filtro inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
    Query(query): Query<ListLeadsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let page = app_state
        .lead_service
        .list_leads(&actor, &query.into())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/leads/{id}
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(
        ("id" = Uuid, Path, description = "ID do lead"),
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Lead", body = Lead),
        (status = 403, description = "Lead fora da visibilidade do usuário"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(lead_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .get_lead(&actor, lead_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(lead)))
}

// GET /api/leads/{id}/analysis
#[utoipa::path(
    get,
    path = "/api/leads/{id}/analysis",
    tag = "Leads",
    params(
        ("id" = Uuid, Path, description = "ID do lead"),
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Análise do lead com rótulos no idioma do cliente", body = LocalizedAnalysis),
        (status = 403, description = "Lead fora da visibilidade do usuário"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_lead_analysis(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(lead_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let result = app_state
        .lead_service
        .analyze(&actor, lead_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(LocalizedAnalysis::new(result, locale.lang()))))
}

// PATCH /api/leads/{id}/status
#[utoipa::path(
    patch,
    path = "/api/leads/{id}/status",
    tag = "Leads",
    request_body = UpdateLeadStatusPayload,
    params(
        ("id" = Uuid, Path, description = "ID do lead"),
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Lead atualizado", body = Lead),
        (status = 403, description = "Sem permissão para editar o lead"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_lead_status(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(lead_id): Path<Uuid>,
    Json(payload): Json<UpdateLeadStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .update_status(&actor, lead_id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(lead)))
}

// =============================================================================
//  OPERAÇÕES EM LOTE
// =============================================================================

// POST /api/leads/bulk-delete
#[utoipa::path(
    post,
    path = "/api/leads/bulk-delete",
    tag = "Leads",
    request_body = BulkDeletePayload,
    params(("x-tenant-id" = Uuid, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Apagados, falhas e sem permissão, contados em separado", body = BulkDeleteReport),
        (status = 400, description = "Nenhum lead selecionado")
    ),
    security(("api_jwt" = []))
)]
pub async fn bulk_delete(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(payload): Json<BulkDeletePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let report = app_state
        .lead_service
        .bulk_delete(&actor, &payload.lead_ids)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(report)))
}

// POST /api/leads/bulk-assign
#[utoipa::path(
    post,
    path = "/api/leads/bulk-assign",
    tag = "Leads",
    request_body = BulkAssignPayload,
    params(("x-tenant-id" = Uuid, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Leads atribuídos", body = BulkAssignReport),
        (status = 400, description = "Seleção de leads ou de representante vazia"),
        (status = 403, description = "Usuário não pode atribuir para esse representante"),
        (status = 404, description = "Representante não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn bulk_assign(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(payload): Json<BulkAssignPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let report = app_state
        .lead_service
        .bulk_assign(&actor, &payload.lead_ids, payload.assigned_to)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(report)))
}

// POST /api/leads/bulk-message
#[utoipa::path(
    post,
    path = "/api/leads/bulk-message",
    tag = "Leads",
    request_body = BulkMessagePayload,
    params(("x-tenant-id" = Uuid, Header, description = "ID do tenant")),
    responses(
        (status = 202, description = "Mensagens enfileiradas", body = BulkMessageReport),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn bulk_message(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(payload): Json<BulkMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let report = app_state
        .lead_service
        .bulk_message(&actor, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::ACCEPTED, Json(report)))
}
