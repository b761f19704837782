// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserStore,
    models::user::{User, UserRecord},
};

// O repositório de usuários, responsável pelas leituras da tabela 'users'.
// Cadastro e senha ficam no serviço de autenticação externo.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<User>, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, tenant_id, full_name, email, phone, role, manager_id, created_at
            FROM users
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(User::try_from).transpose()
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<User>, AppError> {
        let records = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, tenant_id, full_name, email, phone, role, manager_id, created_at
            FROM users
            WHERE tenant_id = $1
            ORDER BY full_name ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(User::try_from).collect()
    }
}
