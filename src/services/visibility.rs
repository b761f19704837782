// src/services/visibility.rs

// Quem pode ver/editar/apagar o quê.
//  - admin: tudo do tenant
//  - manager: leads atribuídos a ele ou aos agentes com manager_id == ele
//  - agent: só os leads atribuídos a ele
// Lead sem responsável só aparece para admin.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{
    lead::{AssigneeScope, Lead},
    user::{Role, User},
};

#[derive(Debug, Clone)]
pub struct AccessScope {
    role: Role,
    // Para manager: ele mesmo + seus agentes. Para agent: só ele.
    team: HashSet<Uuid>,
}

impl AccessScope {
    /// `directory` são os usuários do tenant do ator.
    pub fn resolve(actor: &User, directory: &[User]) -> Self {
        let mut team = HashSet::from([actor.id]);

        if actor.role == Role::Manager {
            team.extend(
                directory
                    .iter()
                    .filter(|u| u.role == Role::Agent && u.manager_id == Some(actor.id))
                    .map(|u| u.id),
            );
        }

        Self {
            role: actor.role,
            team,
        }
    }

    fn covers(&self, assigned_to: Option<Uuid>) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Manager | Role::Agent => assigned_to.is_some_and(|id| self.team.contains(&id)),
        }
    }

    pub fn can_see(&self, lead: &Lead) -> bool {
        self.covers(lead.assigned_to)
    }

    pub fn can_edit(&self, lead: &Lead) -> bool {
        self.covers(lead.assigned_to)
    }

    pub fn can_delete(&self, lead: &Lead) -> bool {
        self.covers(lead.assigned_to)
    }

    pub fn can_see_user(&self, user: &User) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Manager | Role::Agent => self.team.contains(&user.id),
        }
    }

    pub fn can_bulk_assign(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Manager)
    }

    pub fn can_assign_to(&self, user: &User) -> bool {
        self.can_bulk_assign() && self.can_see_user(user)
    }

    /// O mesmo predicado, no formato que o store entende.
    pub fn assignee_scope(&self) -> AssigneeScope {
        match self.role {
            Role::Admin => AssigneeScope::All,
            Role::Manager | Role::Agent => {
                let mut ids: Vec<Uuid> = self.team.iter().copied().collect();
                ids.sort();
                AssigneeScope::Only(ids)
            }
        }
    }

    pub fn filter_users(&self, users: Vec<User>) -> Vec<User> {
        users.into_iter().filter(|u| self.can_see_user(u)).collect()
    }
}
