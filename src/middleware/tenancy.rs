// src/middleware/tenancy.rs

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::common::error::AppError;

// O nome do nosso cabeçalho HTTP customizado
const TENANT_ID_HEADER: &str = "x-tenant-id";

// Armazena o UUID do tenant (a conta do CRM) que o usuário quer acessar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext(pub Uuid);

impl TenantContext {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let value = headers.get(TENANT_ID_HEADER).ok_or(AppError::MissingTenant)?;

        let value_str = value.to_str().map_err(|_| AppError::InvalidTenant)?;
        let tenant_id = Uuid::parse_str(value_str.trim()).map_err(|_| AppError::InvalidTenant)?;

        Ok(TenantContext(tenant_id))
    }
}
