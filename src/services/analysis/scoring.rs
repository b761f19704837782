// src/services/analysis/scoring.rs

use crate::models::{analysis::SignalCounts, lead::LeadStatus};
use crate::services::analysis::{signals::count_signals, Analyzable};

const BASE_SCORE: i64 = 50;
const POSITIVE_WEIGHT: i64 = 5;
const NEGATIVE_WEIGHT: i64 = 8;
const HESITATION_WEIGHT: i64 = 3;
const URGENCY_WEIGHT: i64 = 4;

/// Score de potencial, 0..=100.
pub fn compute_score<L: Analyzable + ?Sized>(lead: &L) -> u8 {
    let counts = lead.notes().map(count_signals);
    score_from(lead.status(), counts.as_ref())
}

/// `counts` é `None` quando o lead não tem notas (nenhum delta aplicado).
pub(crate) fn score_from(status: LeadStatus, counts: Option<&SignalCounts>) -> u8 {
    let mut score = BASE_SCORE;

    if let Some(c) = counts {
        score += i64::from(c.positive) * POSITIVE_WEIGHT;
        score -= i64::from(c.negative) * NEGATIVE_WEIGHT;
        score -= i64::from(c.hesitation) * HESITATION_WEIGHT;
        score += i64::from(c.urgency) * URGENCY_WEIGHT;
    }

    // Ajuste por etapa, depois das notas. Alguns status fixam o valor.
    score = match status {
        LeadStatus::New => score + 10,
        LeadStatus::QuoteSent => score + 20,
        LeadStatus::DealClosed => 100,
        LeadStatus::NotInterested | LeadStatus::Removed => 0,
        LeadStatus::NoAnswer => score - 10,
        LeadStatus::NoAnswer2 => score - 20,
        LeadStatus::ThinkingItOver => score - 5,
        LeadStatus::WrongNumber | LeadStatus::ExistingCustomer => score,
    };

    score.clamp(0, 100) as u8
}
