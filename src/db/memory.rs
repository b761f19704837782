// src/db/memory.rs

// Stores em memória para os testes de serviço e de rotas.

use std::{
    collections::HashSet,
    sync::Mutex,
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LeadStore, UserStore},
    models::{
        bulk::OutboundMessage,
        lead::{AssigneeScope, Lead, LeadFilter, LeadStatus},
        user::User,
    },
};

#[derive(Default)]
pub struct MemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
    outbox: Mutex<Vec<OutboundMessage>>,
    // ids cuja operação deve falhar, simulando erro do colaborador
    failing: Mutex<HashSet<Uuid>>,
    deleted_in_order: Mutex<Vec<Uuid>>,
    fail_assign: Mutex<bool>,
}

impl MemoryLeadStore {
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self {
            leads: Mutex::new(leads),
            ..Self::default()
        }
    }

    pub fn fail_on(&self, id: Uuid) {
        self.failing.lock().unwrap().insert(id);
    }

    pub fn fail_assignments(&self) {
        *self.fail_assign.lock().unwrap() = true;
    }

    pub fn lead(&self, id: Uuid) -> Option<Lead> {
        self.leads.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }

    pub fn outbox(&self) -> Vec<OutboundMessage> {
        self.outbox.lock().unwrap().clone()
    }

    pub fn deleted_in_order(&self) -> Vec<Uuid> {
        self.deleted_in_order.lock().unwrap().clone()
    }

    fn should_fail(&self, id: Uuid) -> bool {
        self.failing.lock().unwrap().contains(&id)
    }
}

fn matches_search(lead: &Lead, term: &str) -> bool {
    let term = term.to_lowercase();
    [Some(&lead.full_name), lead.phone.as_ref(), lead.email.as_ref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn list(
        &self,
        tenant_id: Uuid,
        scope: &AssigneeScope,
        filter: &LeadFilter,
    ) -> Result<(Vec<Lead>, i64), AppError> {
        let mut matching: Vec<Lead> = self
            .leads
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.tenant_id == tenant_id)
            .filter(|l| scope.admits(l.assigned_to))
            .filter(|l| filter.status.is_none_or(|s| l.status == s))
            .filter(|l| filter.assigned_to.is_none_or(|a| l.assigned_to == Some(a)))
            .filter(|l| filter.search_term().is_none_or(|t| matches_search(l, t)))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        let total = matching.len() as i64;

        let page = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.per_page as usize)
            .collect();

        Ok((page, total))
    }

    async fn find(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Lead>, AppError> {
        Ok(self
            .leads
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.tenant_id == tenant_id && l.id == id)
            .cloned())
    }

    async fn find_many(&self, tenant_id: Uuid, ids: &[Uuid]) -> Result<Vec<Lead>, AppError> {
        Ok(self
            .leads
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.tenant_id == tenant_id && ids.contains(&l.id))
            .cloned()
            .collect())
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        self.deleted_in_order.lock().unwrap().push(id);
        if self.should_fail(id) {
            return Err(AppError::InternalServerError(anyhow::anyhow!("delete failed")));
        }

        let mut leads = self.leads.lock().unwrap();
        let before = leads.len();
        leads.retain(|l| !(l.tenant_id == tenant_id && l.id == id));
        Ok(leads.len() < before)
    }

    async fn assign_many(
        &self,
        tenant_id: Uuid,
        ids: &[Uuid],
        assignee_id: Uuid,
    ) -> Result<u64, AppError> {
        if *self.fail_assign.lock().unwrap() {
            return Err(AppError::InternalServerError(anyhow::anyhow!("assign failed")));
        }

        let mut changed = 0;
        for lead in self.leads.lock().unwrap().iter_mut() {
            if lead.tenant_id == tenant_id && ids.contains(&lead.id) {
                lead.assigned_to = Some(assignee_id);
                lead.updated_at = Utc::now();
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn update_status(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: LeadStatus,
    ) -> Result<Option<Lead>, AppError> {
        let mut leads = self.leads.lock().unwrap();
        Ok(leads
            .iter_mut()
            .find(|l| l.tenant_id == tenant_id && l.id == id)
            .map(|lead| {
                lead.status = status;
                lead.updated_at = Utc::now();
                lead.clone()
            }))
    }

    async fn enqueue_message(&self, message: &OutboundMessage) -> Result<(), AppError> {
        if self.should_fail(message.lead_id) {
            return Err(AppError::InternalServerError(anyhow::anyhow!("outbox unavailable")));
        }
        self.outbox.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Vec<User>,
}

impl MemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.tenant_id == tenant_id && u.id == id)
            .cloned())
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<User>, AppError> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}
