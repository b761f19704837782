// src/models/lead.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// --- ENUMS ---

/// Etapas do funil de vendas. Conjunto fechado: qualquer outro valor é
/// rejeitado na fronteira (ver `LeadRecord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum LeadStatus {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "quote-sent")]
    QuoteSent,
    #[serde(rename = "deal-closed")]
    DealClosed,
    #[serde(rename = "no-answer")]
    NoAnswer,
    #[serde(rename = "no-answer-2")]
    NoAnswer2,
    #[serde(rename = "not-interested")]
    NotInterested,
    #[serde(rename = "thinking-it-over")]
    ThinkingItOver,
    #[serde(rename = "removed")]
    Removed,
    #[serde(rename = "wrong-number")]
    WrongNumber,
    #[serde(rename = "existing-customer")]
    ExistingCustomer,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 10] = [
        LeadStatus::New,
        LeadStatus::QuoteSent,
        LeadStatus::DealClosed,
        LeadStatus::NoAnswer,
        LeadStatus::NoAnswer2,
        LeadStatus::NotInterested,
        LeadStatus::ThinkingItOver,
        LeadStatus::Removed,
        LeadStatus::WrongNumber,
        LeadStatus::ExistingCustomer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::QuoteSent => "quote-sent",
            LeadStatus::DealClosed => "deal-closed",
            LeadStatus::NoAnswer => "no-answer",
            LeadStatus::NoAnswer2 => "no-answer-2",
            LeadStatus::NotInterested => "not-interested",
            LeadStatus::ThinkingItOver => "thinking-it-over",
            LeadStatus::Removed => "removed",
            LeadStatus::WrongNumber => "wrong-number",
            LeadStatus::ExistingCustomer => "existing-customer",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::InvalidLeadStatus(s.to_string()))
    }
}

// --- LEAD (O Dado validado) ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Dana Levi")]
    pub full_name: String,

    #[schema(example = "054-1234567")]
    pub phone: Option<String>,
    pub email: Option<String>,

    pub status: LeadStatus,

    // Texto livre do vendedor. É daqui que o motor de análise tira os sinais.
    pub notes: Option<String>,

    pub assigned_to: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- LINHA CRUA DO BANCO ---

/// Como a linha chega do Postgres: o status ainda é texto livre.
#[derive(Debug, Clone, FromRow)]
pub struct LeadRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LeadRecord> for Lead {
    type Error = AppError;

    fn try_from(record: LeadRecord) -> Result<Self, Self::Error> {
        Ok(Lead {
            id: record.id,
            tenant_id: record.tenant_id,
            full_name: record.full_name,
            phone: record.phone,
            email: record.email,
            status: record.status.parse()?,
            notes: record.notes,
            assigned_to: record.assigned_to,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

// --- ENTRADA MÍNIMA DO MOTOR ---

/// O mínimo que o motor de análise precisa saber de um lead.
/// Campos extras enviados pelo cliente são ignorados.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadSnapshot {
    #[schema(example = "quote-sent")]
    pub status: LeadStatus,

    #[schema(example = "מעוניין מאוד, צריך תשובה דחוף")]
    #[serde(default)]
    pub notes: Option<String>,
}

// --- LISTAGEM ---

/// Escopo de visibilidade empurrado para o store na listagem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeScope {
    All,
    Only(Vec<Uuid>),
}

impl AssigneeScope {
    pub fn admits(&self, assigned_to: Option<Uuid>) -> bool {
        match self {
            AssigneeScope::All => true,
            AssigneeScope::Only(ids) => assigned_to.is_some_and(|id| ids.contains(&id)),
        }
    }
}

pub const DEFAULT_PER_PAGE: u32 = 25;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub search: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for LeadFilter {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            assigned_to: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl LeadFilter {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Termo de busca já aparado; `None` se vazio.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadPage<T> {
    pub items: Vec<T>,
    #[schema(example = 132)]
    pub total: i64,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 25)]
    pub per_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>().unwrap(), status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn unknown_status_is_rejected_at_the_boundary() {
        let err = "archived".parse::<LeadStatus>().unwrap_err();
        assert!(matches!(err, AppError::InvalidLeadStatus(ref s) if s == "archived"));
    }

    #[test]
    fn snapshot_ignores_extra_fields_and_missing_notes() {
        let snapshot: LeadSnapshot =
            serde_json::from_str(r#"{"status":"no-answer-2","fullName":"x","id":7}"#).unwrap();
        assert_eq!(snapshot.status, LeadStatus::NoAnswer2);
        assert_eq!(snapshot.notes, None);
    }

    #[test]
    fn filter_offset_and_search_term() {
        let filter = LeadFilter {
            page: 3,
            per_page: 20,
            search: Some("   ".into()),
            ..LeadFilter::default()
        };
        assert_eq!(filter.offset(), 40);
        assert_eq!(filter.search_term(), None);
    }

    #[test]
    fn assignee_scope_never_admits_unassigned_leads_unless_all() {
        let id = Uuid::new_v4();
        assert!(AssigneeScope::All.admits(None));
        assert!(!AssigneeScope::Only(vec![id]).admits(None));
        assert!(AssigneeScope::Only(vec![id]).admits(Some(id)));
    }
}
