// src/models/bulk.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::lead::{Lead, LeadStatus};

// =============================================================================
//  PAYLOADS
// =============================================================================

/// Teto de leads por operação em lote (os deletes e envios são sequenciais).
pub const MAX_BULK_LEADS: usize = 500;

fn within_bulk_limit(lead_ids: &[Uuid]) -> Result<(), ValidationError> {
    if lead_ids.len() > MAX_BULK_LEADS {
        return Err(ValidationError::new("too_many_leads"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeletePayload {
    #[validate(
        length(min = 1, message = "empty_lead_selection"),
        custom(function = "within_bulk_limit")
    )]
    #[schema(max_items = 500)]
    #[schema(example = json!(["550e8400-e29b-41d4-a716-446655440000"]))]
    pub lead_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignPayload {
    #[validate(
        length(min = 1, message = "empty_lead_selection"),
        custom(function = "within_bulk_limit")
    )]
    #[schema(max_items = 500)]
    pub lead_ids: Vec<Uuid>,

    #[validate(required(message = "empty_assignee_selection"))]
    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Whatsapp,
    Email,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Whatsapp => "whatsapp",
            Channel::Email => "email",
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkMessagePayload {
    #[validate(
        length(min = 1, message = "empty_lead_selection"),
        custom(function = "within_bulk_limit")
    )]
    #[schema(max_items = 500)]
    pub lead_ids: Vec<Uuid>,

    pub channel: Channel,

    #[validate(length(max = 200, message = "subject_too_long"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "invalid_message_body"))]
    #[schema(example = "שלום {first_name}, רצינו לחזור אליך לגבי ההצעה")]
    pub body: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadStatusPayload {
    pub status: LeadStatus,
}

// =============================================================================
//  RELATÓRIOS
// =============================================================================

/// As três classes de resultado nunca são somadas: cada uma gera uma
/// mensagem diferente para o usuário.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteReport {
    pub deleted_count: usize,
    pub failed_count: usize,
    pub unauthorized_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignReport {
    pub assigned_count: u64,
    pub unauthorized_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkMessageReport {
    pub queued_count: usize,
    pub failed_count: usize,
    pub missing_contact_count: usize,
    pub unauthorized_count: usize,
}

// =============================================================================
//  FILA DE SAÍDA
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub lead_id: Uuid,
    pub channel: Channel,
    pub recipient: String,
    pub subject: Option<String>,
    pub body: String,
    pub requested_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl OutboundMessage {
    pub fn new(
        lead: &Lead,
        channel: Channel,
        recipient: String,
        subject: Option<String>,
        body: String,
        requested_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: lead.tenant_id,
            lead_id: lead.id,
            channel,
            recipient,
            subject,
            body,
            requested_by,
            created_at: Utc::now(),
        }
    }
}
