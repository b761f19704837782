// src/db/lead_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LeadStore,
    models::{
        bulk::OutboundMessage,
        lead::{AssigneeScope, Lead, LeadFilter, LeadRecord, LeadStatus},
    },
};

const LEAD_COLUMNS: &str =
    "id, tenant_id, full_name, phone, email, status, notes, assigned_to, created_at, updated_at";

/// `%termo%` para ILIKE, com `\`, `%` e `_` do usuário tratados como literais.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Mesmo WHERE para a página e para o COUNT
    fn push_filters(
        qb: &mut QueryBuilder<'_, Postgres>,
        tenant_id: Uuid,
        scope: &AssigneeScope,
        filter: &LeadFilter,
    ) {
        qb.push(" WHERE tenant_id = ").push_bind(tenant_id);

        if let AssigneeScope::Only(ids) = scope {
            qb.push(" AND assigned_to = ANY(").push_bind(ids.clone()).push(")");
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(assigned_to) = filter.assigned_to {
            qb.push(" AND assigned_to = ").push_bind(assigned_to);
        }
        if let Some(term) = filter.search_term() {
            let pattern = contains_pattern(term);
            qb.push(" AND (full_name ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR phone ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR email ILIKE ")
                .push_bind(pattern)
                .push(r" ESCAPE '\')");
        }
    }

    fn into_leads(records: Vec<LeadRecord>) -> Result<Vec<Lead>, AppError> {
        records.into_iter().map(Lead::try_from).collect()
    }
}

#[async_trait]
impl LeadStore for LeadRepository {
    async fn list(
        &self,
        tenant_id: Uuid,
        scope: &AssigneeScope,
        filter: &LeadFilter,
    ) -> Result<(Vec<Lead>, i64), AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM leads");
        Self::push_filters(&mut count_qb, tenant_id, scope, filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM leads", LEAD_COLUMNS));
        Self::push_filters(&mut qb, tenant_id, scope, filter);
        qb.push(" ORDER BY created_at DESC, id ASC LIMIT ")
            .push_bind(i64::from(filter.per_page))
            .push(" OFFSET ")
            .push_bind(filter.offset() as i64);

        let records = qb
            .build_query_as::<LeadRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok((Self::into_leads(records)?, total))
    }

    async fn find(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Lead>, AppError> {
        let sql = format!("SELECT {} FROM leads WHERE tenant_id = $1 AND id = $2", LEAD_COLUMNS);

        let record = sqlx::query_as::<_, LeadRecord>(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        record.map(Lead::try_from).transpose()
    }

    async fn find_many(&self, tenant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Lead>, AppError> {
        let sql = format!(
            "SELECT {} FROM leads WHERE tenant_id = $1 AND id = ANY($2)",
            LEAD_COLUMNS
        );

        let records = sqlx::query_as::<_, LeadRecord>(&sql)
            .bind(tenant_id)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Self::into_leads(records)
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn assign_many(
        &self,
        tenant_id: Uuid,
        ids: &[Uuid],
        assignee_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE leads
            SET assigned_to = $3, updated_at = NOW()
            WHERE tenant_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(tenant_id)
        .bind(ids)
        .bind(assignee_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn update_status(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: LeadStatus,
    ) -> Result<Option<Lead>, AppError> {
        let sql = format!(
            "UPDATE leads SET status = $3, updated_at = NOW() \
             WHERE tenant_id = $1 AND id = $2 RETURNING {}",
            LEAD_COLUMNS
        );

        let record = sqlx::query_as::<_, LeadRecord>(&sql)
            .bind(tenant_id)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;

        record.map(Lead::try_from).transpose()
    }

    async fn enqueue_message(&self, message: &OutboundMessage) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO outbound_messages (
                id, tenant_id, lead_id, channel, recipient, subject, body, requested_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(message.id)
        .bind(message.tenant_id)
        .bind(message.lead_id)
        .bind(message.channel.as_str())
        .bind(&message.recipient)
        .bind(message.subject.as_deref())
        .bind(&message.body)
        .bind(message.requested_by)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("dana"), "%dana%");
        assert_eq!(contains_pattern("100%"), r"%100\%%");
        assert_eq!(contains_pattern("a_b"), r"%a\_b%");
        assert_eq!(contains_pattern(r"c:\x"), r"%c:\\x%");
        assert_eq!(contains_pattern("_"), r"%\_%");
    }
}
