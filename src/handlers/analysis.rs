// src/handlers/analysis.rs

// Análise avulsa: o cliente manda status + notas e recebe o resultado,
// sem nada ser lido ou gravado.

use axum::{http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        analysis::{LocalizedAnalysis, NextStatusPrediction},
        lead::LeadSnapshot,
    },
    services::analysis::{analyze_lead, predict_next_status},
};

// POST /api/analysis
#[utoipa::path(
    post,
    path = "/api/analysis",
    tag = "Analysis",
    request_body = LeadSnapshot,
    params(("x-tenant-id" = Uuid, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Score, sentimento, classificação, ações e próxima etapa", body = LocalizedAnalysis),
        (status = 422, description = "Status desconhecido ou corpo malformado")
    ),
    security(("api_jwt" = []))
)]
pub async fn analyze(
    locale: Locale,
    _user: AuthenticatedUser,
    Json(snapshot): Json<LeadSnapshot>,
) -> impl IntoResponse {
    let result = analyze_lead(&snapshot);
    (StatusCode::OK, Json(LocalizedAnalysis::new(result, locale.lang())))
}

// POST /api/analysis/next-status
#[utoipa::path(
    post,
    path = "/api/analysis/next-status",
    tag = "Analysis",
    request_body = LeadSnapshot,
    params(("x-tenant-id" = Uuid, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Próxima etapa sugerida", body = NextStatusPrediction)
    ),
    security(("api_jwt" = []))
)]
pub async fn predict_next(
    _user: AuthenticatedUser,
    Json(snapshot): Json<LeadSnapshot>,
) -> impl IntoResponse {
    let prediction = NextStatusPrediction {
        current_status: snapshot.status,
        next_status: predict_next_status(&snapshot),
    };
    (StatusCode::OK, Json(prediction))
}
