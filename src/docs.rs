// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Leads ---
        handlers::leads::list_leads,
        handlers::leads::get_lead,
        handlers::leads::get_lead_analysis,
        handlers::leads::update_lead_status,
        handlers::leads::bulk_delete,
        handlers::leads::bulk_assign,
        handlers::leads::bulk_message,

        // --- Analysis ---
        handlers::analysis::analyze,
        handlers::analysis::predict_next,

        // --- Users ---
        handlers::users::get_me,
        handlers::users::list_users,
        handlers::users::list_assignable_users,
    ),
    components(
        schemas(
            // --- Leads ---
            models::lead::LeadStatus,
            models::lead::Lead,
            models::lead::LeadSnapshot,

            // --- Analysis ---
            models::analysis::Sentiment,
            models::analysis::Classification,
            models::analysis::RecommendedAction,
            models::analysis::AnalysisResult,
            models::analysis::LocalizedAnalysis,
            models::analysis::LeadWithAnalysis,
            models::analysis::NextStatusPrediction,

            // --- Bulk ---
            models::bulk::Channel,
            models::bulk::BulkDeletePayload,
            models::bulk::BulkAssignPayload,
            models::bulk::BulkMessagePayload,
            models::bulk::UpdateLeadStatusPayload,
            models::bulk::BulkDeleteReport,
            models::bulk::BulkAssignReport,
            models::bulk::BulkMessageReport,

            // --- Users ---
            models::user::Role,
            models::user::User,
        )
    ),
    tags(
        (name = "Leads", description = "Leads visíveis, análise e operações em lote"),
        (name = "Analysis", description = "Motor de análise avulso"),
        (name = "Users", description = "Usuários do tenant")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
