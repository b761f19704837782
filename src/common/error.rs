use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n, middleware::i18n::Locale};

// Erro de domínio. Os handlers convertem para `ApiError` com o idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Status de lead desconhecido: {0}")]
    InvalidLeadStatus(String),

    #[error("Papel de usuário desconhecido: {0}")]
    InvalidRole(String),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Cabeçalho X-Tenant-ID ausente")]
    MissingTenant,

    #[error("Cabeçalho X-Tenant-ID inválido")]
    InvalidTenant,

    #[error("Usuário não pertence ao tenant")]
    NotTenantMember,

    #[error("Lead não encontrado")]
    LeadNotFound,

    #[error("Representante não encontrado")]
    AssigneeNotFound,

    #[error("Ação não permitida")]
    Forbidden,

    #[error("Nenhum lead selecionado")]
    EmptyLeadSelection,

    #[error("Nenhum representante selecionado")]
    EmptyAssigneeSelection,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidLeadStatus(_)
            | AppError::MissingTenant
            | AppError::InvalidTenant
            | AppError::EmptyLeadSelection
            | AppError::EmptyAssigneeSelection => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotTenantMember | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::LeadNotFound | AppError::AssigneeNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::InvalidRole(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::InvalidLeadStatus(_) => "invalid_lead_status",
            AppError::InvalidRole(_) => "invalid_role",
            AppError::InvalidToken => "invalid_token",
            AppError::MissingTenant => "missing_tenant",
            AppError::InvalidTenant => "invalid_tenant",
            AppError::NotTenantMember => "not_tenant_member",
            AppError::LeadNotFound => "lead_not_found",
            AppError::AssigneeNotFound => "assignee_not_found",
            AppError::Forbidden => "forbidden",
            AppError::EmptyLeadSelection => "empty_lead_selection",
            AppError::EmptyAssigneeSelection => "empty_assignee_selection",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let lang = locale.lang();
        let status = self.status();

        let details = match &self {
            // Retorna todos os detalhes da validação, campo a campo (códigos, não frases)
            AppError::ValidationError(errors) => {
                let details: serde_json::Map<String, Value> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, field_errors)| {
                        let codes: Vec<String> = field_errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect();
                        (field.to_string(), json!(codes))
                    })
                    .collect();
                Some(Value::Object(details))
            }
            AppError::InvalidLeadStatus(value) => Some(json!({ "status": value })),
            // O `tracing` loga a mensagem detalhada; o cliente recebe só a genérica.
            e if status.is_server_error() => {
                tracing::error!("Erro interno do servidor: {}", e);
                None
            }
            _ => None,
        };

        ApiError {
            status,
            error: i18n::message(self.message_key(), lang).to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

/// Corpo de erro que vai para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        err.to_api_error(&Locale::default())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}
