// src/services/analysis/predict.rs

use crate::models::{analysis::Sentiment, lead::LeadStatus};
use crate::services::analysis::{scoring::compute_score, sentiment::classify_sentiment, Analyzable};

const CLOSE_DEAL_SCORE: u8 = 70;

/// Próxima etapa sugerida. Total: status sem transição definida ficam como estão.
pub fn predict_next_status<L: Analyzable + ?Sized>(lead: &L) -> LeadStatus {
    next_status_from(lead.status(), classify_sentiment(lead), compute_score(lead))
}

pub(crate) fn next_status_from(status: LeadStatus, sentiment: Sentiment, score: u8) -> LeadStatus {
    let positive = sentiment == Sentiment::Positive;

    match status {
        LeadStatus::New if positive => LeadStatus::QuoteSent,
        LeadStatus::New => LeadStatus::NoAnswer,
        LeadStatus::QuoteSent if score >= CLOSE_DEAL_SCORE => LeadStatus::DealClosed,
        LeadStatus::QuoteSent => LeadStatus::ThinkingItOver,
        LeadStatus::NoAnswer => LeadStatus::NoAnswer2,
        LeadStatus::ThinkingItOver if positive => LeadStatus::QuoteSent,
        LeadStatus::ThinkingItOver => LeadStatus::NotInterested,
        LeadStatus::NoAnswer2
        | LeadStatus::DealClosed
        | LeadStatus::NotInterested
        | LeadStatus::Removed
        | LeadStatus::WrongNumber
        | LeadStatus::ExistingCustomer => status,
    }
}
