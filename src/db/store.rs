// src/db/store.rs

// Fronteira com o armazenamento. O serviço de leads só conhece estes traits;
// o Postgres (lead_repo / user_repo) é uma implementação, os testes usam outra.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        bulk::OutboundMessage,
        lead::{AssigneeScope, Lead, LeadFilter, LeadStatus},
        user::User,
    },
};

#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Página de leads visíveis + total (sem paginação) para o mesmo filtro.
    async fn list(
        &self,
        tenant_id: Uuid,
        scope: &AssigneeScope,
        filter: &LeadFilter,
    ) -> Result<(Vec<Lead>, i64), AppError>;

    async fn find(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Lead>, AppError>;

    async fn find_many(&self, tenant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Lead>, AppError>;

    /// `false` quando o lead não existia.
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Atribuição em lote numa única chamada. Devolve quantas linhas mudaram.
    async fn assign_many(
        &self,
        tenant_id: Uuid,
        ids: &[Uuid],
        assignee_id: Uuid,
    ) -> Result<u64, AppError>;

    async fn update_status(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: LeadStatus,
    ) -> Result<Option<Lead>, AppError>;

    async fn enqueue_message(&self, message: &OutboundMessage) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<User>, AppError>;

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<User>, AppError>;
}
