// src/services/lead_service.rs

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LeadStore, UserStore},
    models::{
        analysis::{AnalysisResult, LeadWithAnalysis},
        bulk::{
            BulkAssignReport, BulkDeleteReport, BulkMessagePayload, BulkMessageReport,
            OutboundMessage,
        },
        lead::{Lead, LeadFilter, LeadPage, LeadStatus},
        user::{Role, User},
    },
    services::{
        analysis::analyze_lead,
        outreach::{recipient_for, render_template},
        visibility::AccessScope,
    },
};

#[derive(Clone)]
pub struct LeadService {
    leads: Arc<dyn LeadStore>,
    users: Arc<dyn UserStore>,
    whatsapp_country_code: String,
}

/// Remove repetidos mantendo a ordem do pedido.
fn dedupe(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

impl LeadService {
    pub fn new(
        leads: Arc<dyn LeadStore>,
        users: Arc<dyn UserStore>,
        whatsapp_country_code: String,
    ) -> Self {
        Self {
            leads,
            users,
            whatsapp_country_code,
        }
    }

    pub async fn scope_for(&self, actor: &User) -> Result<AccessScope, AppError> {
        // Só o manager precisa do diretório (para achar os próprios agentes)
        let directory = match actor.role {
            Role::Manager => self.users.list_by_tenant(actor.tenant_id).await?,
            Role::Admin | Role::Agent => Vec::new(),
        };
        Ok(AccessScope::resolve(actor, &directory))
    }

    async fn leads_by_id(
        &self,
        actor: &User,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Lead>, AppError> {
        let found = self.leads.find_many(actor.tenant_id, ids).await?;
        Ok(found.into_iter().map(|lead| (lead.id, lead)).collect())
    }

    // =========================================================================
    //  CONSULTA
    // =========================================================================

    pub async fn list_leads(
        &self,
        actor: &User,
        filter: &LeadFilter,
    ) -> Result<LeadPage<LeadWithAnalysis>, AppError> {
        let scope = self.scope_for(actor).await?;

        let (leads, total) = self
            .leads
            .list(actor.tenant_id, &scope.assignee_scope(), filter)
            .await?;

        let items = leads
            .into_iter()
            .map(|lead| {
                let analysis = analyze_lead(&lead);
                LeadWithAnalysis { lead, analysis }
            })
            .collect();

        Ok(LeadPage {
            items,
            total,
            page: filter.page,
            per_page: filter.per_page,
        })
    }

    pub async fn get_lead(&self, actor: &User, lead_id: Uuid) -> Result<Lead, AppError> {
        let lead = self
            .leads
            .find(actor.tenant_id, lead_id)
            .await?
            .ok_or(AppError::LeadNotFound)?;

        let scope = self.scope_for(actor).await?;
        if !scope.can_see(&lead) {
            return Err(AppError::Forbidden);
        }
        Ok(lead)
    }

    pub async fn analyze(&self, actor: &User, lead_id: Uuid) -> Result<AnalysisResult, AppError> {
        let lead = self.get_lead(actor, lead_id).await?;
        Ok(analyze_lead(&lead))
    }

    pub async fn update_status(
        &self,
        actor: &User,
        lead_id: Uuid,
        status: LeadStatus,
    ) -> Result<Lead, AppError> {
        let lead = self
            .leads
            .find(actor.tenant_id, lead_id)
            .await?
            .ok_or(AppError::LeadNotFound)?;

        let scope = self.scope_for(actor).await?;
        if !scope.can_edit(&lead) {
            return Err(AppError::Forbidden);
        }

        let updated = self
            .leads
            .update_status(actor.tenant_id, lead_id, status)
            .await?
            .ok_or(AppError::LeadNotFound)?;

        tracing::info!(
            "Lead {} mudou de '{}' para '{}' (por {})",
            lead_id,
            lead.status,
            updated.status,
            actor.id
        );
        Ok(updated)
    }

    // =========================================================================
    //  OPERAÇÕES EM LOTE
    // =========================================================================

    /// Um delete por lead, em sequência, na ordem pedida.
    /// Ids desconhecidos e erros do store contam como falha; falta de
    /// permissão tem contagem própria.
    pub async fn bulk_delete(
        &self,
        actor: &User,
        lead_ids: &[Uuid],
    ) -> Result<BulkDeleteReport, AppError> {
        if lead_ids.is_empty() {
            return Err(AppError::EmptyLeadSelection);
        }

        let ids = dedupe(lead_ids);
        let scope = self.scope_for(actor).await?;
        let found = self.leads_by_id(actor, &ids).await?;

        let mut report = BulkDeleteReport::default();
        let mut authorized = Vec::with_capacity(ids.len());

        for id in ids {
            match found.get(&id) {
                None => report.failed_count += 1,
                Some(lead) if !scope.can_delete(lead) => report.unauthorized_count += 1,
                Some(_) => authorized.push(id),
            }
        }

        for id in authorized {
            match self.leads.delete(actor.tenant_id, id).await {
                Ok(true) => report.deleted_count += 1,
                Ok(false) => report.failed_count += 1,
                Err(e) => {
                    tracing::warn!("Falha ao apagar lead {}: {}", id, e);
                    report.failed_count += 1;
                }
            }
        }

        tracing::info!(
            "🗑️ Exclusão em lote por {}: {} apagados, {} falharam, {} sem permissão",
            actor.id,
            report.deleted_count,
            report.failed_count,
            report.unauthorized_count
        );
        Ok(report)
    }

    /// Uma única chamada ao store, sem retry. Leads que o ator não pode
    /// editar ficam de fora e são contados.
    pub async fn bulk_assign(
        &self,
        actor: &User,
        lead_ids: &[Uuid],
        assignee_id: Option<Uuid>,
    ) -> Result<BulkAssignReport, AppError> {
        if lead_ids.is_empty() {
            return Err(AppError::EmptyLeadSelection);
        }
        let assignee_id = assignee_id.ok_or(AppError::EmptyAssigneeSelection)?;

        let scope = self.scope_for(actor).await?;
        if !scope.can_bulk_assign() {
            return Err(AppError::Forbidden);
        }

        let assignee = self
            .users
            .find_by_id(actor.tenant_id, assignee_id)
            .await?
            .ok_or(AppError::AssigneeNotFound)?;
        if !scope.can_assign_to(&assignee) {
            return Err(AppError::Forbidden);
        }

        let ids = dedupe(lead_ids);
        let found = self.leads_by_id(actor, &ids).await?;

        let (authorized, unauthorized): (Vec<Uuid>, Vec<Uuid>) = ids
            .into_iter()
            .filter(|id| found.contains_key(id))
            .partition(|id| found.get(id).is_some_and(|lead| scope.can_edit(lead)));

        let mut report = BulkAssignReport {
            assigned_count: 0,
            unauthorized_count: unauthorized.len(),
        };

        if !authorized.is_empty() {
            report.assigned_count = self
                .leads
                .assign_many(actor.tenant_id, &authorized, assignee.id)
                .await?;
        }

        tracing::info!(
            "Atribuição em lote por {}: {} leads para {}, {} sem permissão",
            actor.id,
            report.assigned_count,
            assignee.id,
            report.unauthorized_count
        );
        Ok(report)
    }

    /// Enfileira uma mensagem por lead, em sequência.
    pub async fn bulk_message(
        &self,
        actor: &User,
        payload: &BulkMessagePayload,
    ) -> Result<BulkMessageReport, AppError> {
        if payload.lead_ids.is_empty() {
            return Err(AppError::EmptyLeadSelection);
        }

        let ids = dedupe(&payload.lead_ids);
        let scope = self.scope_for(actor).await?;
        let found = self.leads_by_id(actor, &ids).await?;

        let mut report = BulkMessageReport::default();

        for id in ids {
            let lead = match found.get(&id) {
                None => {
                    report.failed_count += 1;
                    continue;
                }
                Some(lead) if !scope.can_edit(lead) => {
                    report.unauthorized_count += 1;
                    continue;
                }
                Some(lead) => lead,
            };

            let Some(recipient) = recipient_for(payload.channel, lead, &self.whatsapp_country_code)
            else {
                report.missing_contact_count += 1;
                continue;
            };

            let message = OutboundMessage::new(
                lead,
                payload.channel,
                recipient,
                payload.subject.clone(),
                render_template(&payload.body, lead),
                actor.id,
            );

            match self.leads.enqueue_message(&message).await {
                Ok(()) => report.queued_count += 1,
                Err(e) => {
                    tracing::warn!("Falha ao enfileirar mensagem para o lead {}: {}", id, e);
                    report.failed_count += 1;
                }
            }
        }

        tracing::info!(
            "📨 Envio em lote ({}) por {}: {} na fila, {} falharam, {} sem contato, {} sem permissão",
            payload.channel.as_str(),
            actor.id,
            report.queued_count,
            report.failed_count,
            report.missing_contact_count,
            report.unauthorized_count
        );
        Ok(report)
    }

    // =========================================================================
    //  USUÁRIOS
    // =========================================================================

    pub async fn list_users(&self, actor: &User) -> Result<Vec<User>, AppError> {
        let directory = self.users.list_by_tenant(actor.tenant_id).await?;
        let scope = AccessScope::resolve(actor, &directory);
        Ok(scope.filter_users(directory))
    }

    /// Quem o ator pode escolher como responsável. Vazio para agentes.
    pub async fn assignable_users(&self, actor: &User) -> Result<Vec<User>, AppError> {
        let directory = self.users.list_by_tenant(actor.tenant_id).await?;
        let scope = AccessScope::resolve(actor, &directory);
        Ok(directory
            .into_iter()
            .filter(|u| scope.can_assign_to(u))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryLeadStore,
        models::bulk::Channel,
        test_support::{lead_assigned_to, Team},
    };

    fn service(team: &Team, store: &Arc<MemoryLeadStore>) -> LeadService {
        LeadService::new(store.clone(), team.user_store(), "972".into())
    }

    #[tokio::test]
    async fn bulk_delete_reports_three_outcomes_separately() {
        let team = Team::new();
        let own = lead_assigned_to(&team, Some(team.agent_a.id));
        let broken = lead_assigned_to(&team, Some(team.agent_a.id));
        let foreign = lead_assigned_to(&team, Some(team.agent_b.id));
        let store = Arc::new(MemoryLeadStore::with_leads(vec![
            own.clone(),
            broken.clone(),
            foreign.clone(),
        ]));
        store.fail_on(broken.id);

        let report = service(&team, &store)
            .bulk_delete(&team.agent_a, &[own.id, broken.id, foreign.id, Uuid::new_v4()])
            .await
            .unwrap();

        assert_eq!(
            report,
            BulkDeleteReport { deleted_count: 1, failed_count: 2, unauthorized_count: 1 }
        );
        assert!(store.lead(own.id).is_none());
        assert!(store.lead(broken.id).is_some());
        assert!(store.lead(foreign.id).is_some());
    }

    #[tokio::test]
    async fn bulk_delete_dedupes_and_keeps_request_order() {
        let team = Team::new();
        let first = lead_assigned_to(&team, Some(team.agent_b.id));
        let second = lead_assigned_to(&team, Some(team.agent_a.id));
        let store = Arc::new(MemoryLeadStore::with_leads(vec![first.clone(), second.clone()]));

        let report = service(&team, &store)
            .bulk_delete(&team.manager, &[second.id, first.id, second.id])
            .await
            .unwrap();

        assert_eq!(report.deleted_count, 2);
        assert_eq!(store.deleted_in_order(), vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn bulk_delete_requires_a_selection() {
        let team = Team::new();
        let store = Arc::new(MemoryLeadStore::default());
        let err = service(&team, &store).bulk_delete(&team.admin, &[]).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyLeadSelection));
    }

    #[tokio::test]
    async fn bulk_assign_validates_selection_before_anything_else() {
        let team = Team::new();
        let store = Arc::new(MemoryLeadStore::default());
        let svc = service(&team, &store);

        let err = svc.bulk_assign(&team.admin, &[], Some(team.agent_a.id)).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyLeadSelection));

        let err = svc.bulk_assign(&team.admin, &[Uuid::new_v4()], None).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyAssigneeSelection));
    }

    #[tokio::test]
    async fn agents_cannot_bulk_assign() {
        let team = Team::new();
        let lead = lead_assigned_to(&team, Some(team.agent_a.id));
        let store = Arc::new(MemoryLeadStore::with_leads(vec![lead.clone()]));

        let err = service(&team, &store)
            .bulk_assign(&team.agent_a, &[lead.id], Some(team.agent_a.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn manager_assigns_within_team_and_skips_the_rest() {
        let team = Team::new();
        let mine = lead_assigned_to(&team, Some(team.agent_a.id));
        let other = lead_assigned_to(&team, Some(team.agent_c.id));
        let store = Arc::new(MemoryLeadStore::with_leads(vec![mine.clone(), other.clone()]));
        let svc = service(&team, &store);

        let report = svc
            .bulk_assign(&team.manager, &[mine.id, other.id], Some(team.agent_b.id))
            .await
            .unwrap();

        assert_eq!(report, BulkAssignReport { assigned_count: 1, unauthorized_count: 1 });
        assert_eq!(store.lead(mine.id).unwrap().assigned_to, Some(team.agent_b.id));
        assert_eq!(store.lead(other.id).unwrap().assigned_to, Some(team.agent_c.id));

        // agent_c está fora do time: não pode ser escolhido
        let err = svc
            .bulk_assign(&team.manager, &[mine.id], Some(team.agent_c.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let err = svc
            .bulk_assign(&team.manager, &[mine.id], Some(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AssigneeNotFound));
    }

    #[tokio::test]
    async fn bulk_assign_store_failure_is_not_retried() {
        let team = Team::new();
        let lead = lead_assigned_to(&team, None);
        let store = Arc::new(MemoryLeadStore::with_leads(vec![lead.clone()]));
        store.fail_assignments();

        let err = service(&team, &store)
            .bulk_assign(&team.admin, &[lead.id], Some(team.agent_a.id))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InternalServerError(_)));
        assert_eq!(store.lead(lead.id).unwrap().assigned_to, None);
    }

    #[tokio::test]
    async fn bulk_message_renders_and_queues_per_lead() {
        let team = Team::new();
        let mut reachable = lead_assigned_to(&team, Some(team.agent_a.id));
        reachable.full_name = "Dana Levi".into();
        let mut silent = lead_assigned_to(&team, Some(team.agent_a.id));
        silent.phone = None;
        let broken = lead_assigned_to(&team, Some(team.agent_a.id));
        let foreign = lead_assigned_to(&team, Some(team.agent_b.id));
        let store = Arc::new(MemoryLeadStore::with_leads(vec![
            reachable.clone(),
            silent.clone(),
            broken.clone(),
            foreign.clone(),
        ]));
        store.fail_on(broken.id);

        let payload = BulkMessagePayload {
            lead_ids: vec![reachable.id, silent.id, broken.id, foreign.id],
            channel: Channel::Whatsapp,
            subject: None,
            body: "Olá {first_name}".into(),
        };
        let report = service(&team, &store)
            .bulk_message(&team.agent_a, &payload)
            .await
            .unwrap();

        assert_eq!(
            report,
            BulkMessageReport {
                queued_count: 1,
                failed_count: 1,
                missing_contact_count: 1,
                unauthorized_count: 1,
            }
        );

        let outbox = store.outbox();
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].lead_id, reachable.id);
        assert_eq!(outbox[0].recipient, "972541234567");
        assert_eq!(outbox[0].body, "Olá Dana");
        assert_eq!(outbox[0].requested_by, team.agent_a.id);
    }

    #[tokio::test]
    async fn malformed_email_counts_as_missing_contact() {
        let team = Team::new();
        let mut good = lead_assigned_to(&team, Some(team.agent_a.id));
        good.email = Some("dana@example.com".into());
        let mut bad = lead_assigned_to(&team, Some(team.agent_a.id));
        bad.email = Some("a@b@c".into());
        let store = Arc::new(MemoryLeadStore::with_leads(vec![good.clone(), bad.clone()]));

        let payload = BulkMessagePayload {
            lead_ids: vec![good.id, bad.id],
            channel: Channel::Email,
            subject: Some("Proposta".into()),
            body: "Olá {name}".into(),
        };
        let report = service(&team, &store)
            .bulk_message(&team.agent_a, &payload)
            .await
            .unwrap();

        assert_eq!(report.queued_count, 1);
        assert_eq!(report.missing_contact_count, 1);
        let outbox = store.outbox();
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].recipient, "dana@example.com");
    }

    #[tokio::test]
    async fn listing_is_scoped_and_analyzed() {
        let team = Team::new();
        let mine = lead_assigned_to(&team, Some(team.agent_a.id));
        let theirs = lead_assigned_to(&team, Some(team.agent_b.id));
        let unassigned = lead_assigned_to(&team, None);
        let store = Arc::new(MemoryLeadStore::with_leads(vec![
            mine.clone(),
            theirs.clone(),
            unassigned.clone(),
        ]));
        let svc = service(&team, &store);

        let page = svc.list_leads(&team.agent_a, &LeadFilter::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].lead.id, mine.id);
        assert_eq!(page.items[0].analysis, analyze_lead(&mine));

        let page = svc.list_leads(&team.manager, &LeadFilter::default()).await.unwrap();
        assert_eq!(page.total, 2);

        let page = svc.list_leads(&team.admin, &LeadFilter::default()).await.unwrap();
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn listing_paginates_and_filters() {
        let team = Team::new();
        let mut leads: Vec<Lead> = (0..5)
            .map(|_| lead_assigned_to(&team, Some(team.agent_a.id)))
            .collect();
        leads[0].status = LeadStatus::QuoteSent;
        leads[1].full_name = "Moshe Peretz".into();
        let store = Arc::new(MemoryLeadStore::with_leads(leads.clone()));
        let svc = service(&team, &store);

        let filter = LeadFilter { page: 2, per_page: 2, ..LeadFilter::default() };
        let page = svc.list_leads(&team.admin, &filter).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 2);

        let filter = LeadFilter { status: Some(LeadStatus::QuoteSent), ..LeadFilter::default() };
        let page = svc.list_leads(&team.admin, &filter).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].lead.id, leads[0].id);

        let filter = LeadFilter { search: Some(" peretz ".into()), ..LeadFilter::default() };
        let page = svc.list_leads(&team.admin, &filter).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].lead.id, leads[1].id);

        // curingas do LIKE são texto literal na busca
        for term in ["%", "_"] {
            let filter = LeadFilter { search: Some(term.into()), ..LeadFilter::default() };
            assert_eq!(svc.list_leads(&team.admin, &filter).await.unwrap().total, 0);
        }
    }

    #[tokio::test]
    async fn single_lead_access_distinguishes_missing_from_forbidden() {
        let team = Team::new();
        let theirs = lead_assigned_to(&team, Some(team.agent_b.id));
        let store = Arc::new(MemoryLeadStore::with_leads(vec![theirs.clone()]));
        let svc = service(&team, &store);

        let err = svc.get_lead(&team.agent_a, theirs.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let err = svc.get_lead(&team.agent_a, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::LeadNotFound));

        let analysis = svc.analyze(&team.manager, theirs.id).await.unwrap();
        assert_eq!(analysis.potential_score, 60);
    }

    #[tokio::test]
    async fn status_update_requires_edit_rights() {
        let team = Team::new();
        let lead = lead_assigned_to(&team, Some(team.agent_a.id));
        let store = Arc::new(MemoryLeadStore::with_leads(vec![lead.clone()]));
        let svc = service(&team, &store);

        let err = svc
            .update_status(&team.agent_b, lead.id, LeadStatus::QuoteSent)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let updated = svc
            .update_status(&team.agent_a, lead.id, LeadStatus::QuoteSent)
            .await
            .unwrap();
        assert_eq!(updated.status, LeadStatus::QuoteSent);
        assert_eq!(store.lead(lead.id).unwrap().status, LeadStatus::QuoteSent);
    }

    #[tokio::test]
    async fn user_listings_follow_visibility() {
        let team = Team::new();
        let store = Arc::new(MemoryLeadStore::default());
        let svc = service(&team, &store);

        assert_eq!(svc.list_users(&team.admin).await.unwrap().len(), 5);
        assert_eq!(svc.list_users(&team.manager).await.unwrap().len(), 3);
        assert_eq!(svc.list_users(&team.agent_c).await.unwrap(), vec![team.agent_c.clone()]);

        assert!(svc.assignable_users(&team.agent_a).await.unwrap().is_empty());
        assert_eq!(svc.assignable_users(&team.manager).await.unwrap().len(), 3);
    }
}
