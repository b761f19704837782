// src/test_support.rs

// Um tenant de teste com a hierarquia completa:
//   admin
//   manager -> agent_a, agent_b
//   agent_c (sem manager)

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{memory::MemoryUserStore, UserStore},
    models::{
        lead::{Lead, LeadStatus},
        user::{Role, User},
    },
    services::visibility::AccessScope,
};

pub const JWT_SECRET: &str = "segredo-de-teste";

pub struct Team {
    pub tenant_id: Uuid,
    pub admin: User,
    pub manager: User,
    pub agent_a: User,
    pub agent_b: User,
    pub agent_c: User,
}

fn user(tenant_id: Uuid, name: &str, role: Role, manager_id: Option<Uuid>) -> User {
    User {
        id: Uuid::new_v4(),
        tenant_id,
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        role,
        manager_id,
        created_at: Utc::now(),
    }
}

impl Team {
    pub fn new() -> Self {
        let tenant_id = Uuid::new_v4();
        let admin = user(tenant_id, "Admin", Role::Admin, None);
        let manager = user(tenant_id, "Manager", Role::Manager, None);
        let agent_a = user(tenant_id, "AgentA", Role::Agent, Some(manager.id));
        let agent_b = user(tenant_id, "AgentB", Role::Agent, Some(manager.id));
        let agent_c = user(tenant_id, "AgentC", Role::Agent, None);

        Self {
            tenant_id,
            admin,
            manager,
            agent_a,
            agent_b,
            agent_c,
        }
    }

    pub fn users(&self) -> Vec<User> {
        vec![
            self.admin.clone(),
            self.manager.clone(),
            self.agent_a.clone(),
            self.agent_b.clone(),
            self.agent_c.clone(),
        ]
    }

    pub fn user_store(&self) -> Arc<dyn UserStore> {
        Arc::new(MemoryUserStore::new(self.users()))
    }

    pub fn scope_for(&self, actor: &User) -> AccessScope {
        AccessScope::resolve(actor, &self.users())
    }
}

/// Lead novo, sem notas, com telefone local válido.
pub fn lead_assigned_to(team: &Team, assigned_to: Option<Uuid>) -> Lead {
    let now = Utc::now();
    Lead {
        id: Uuid::new_v4(),
        tenant_id: team.tenant_id,
        full_name: "Lead de Teste".into(),
        phone: Some("054-1234567".into()),
        email: Some("lead@example.com".into()),
        status: LeadStatus::New,
        notes: None,
        assigned_to,
        created_at: now,
        updated_at: now,
    }
}
