// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn app(app_state: AppState) -> Router {
    let lead_routes = Router::new()
        .route("/", get(handlers::leads::list_leads))
        .route("/bulk-delete", post(handlers::leads::bulk_delete))
        .route("/bulk-assign", post(handlers::leads::bulk_assign))
        .route("/bulk-message", post(handlers::leads::bulk_message))
        .route("/{id}", get(handlers::leads::get_lead))
        .route("/{id}/analysis", get(handlers::leads::get_lead_analysis))
        .route("/{id}/status", patch(handlers::leads::update_lead_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let analysis_routes = Router::new()
        .route("/", post(handlers::analysis::analyze))
        .route("/next-status", post(handlers::analysis::predict_next))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route("/me", get(handlers::users::get_me))
        .route("/assignable", get(handlers::users::list_assignable_users))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/leads", lead_routes)
        .nest("/api/analysis", analysis_routes)
        .nest("/api/users", user_routes)
        .with_state(app_state)
}
