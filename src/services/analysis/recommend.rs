// src/services/analysis/recommend.rs

use crate::models::{
    analysis::{RecommendedAction, Sentiment, SignalCounts},
    lead::LeadStatus,
};
use crate::services::analysis::Analyzable;

pub const MAX_ACTIONS: usize = 4;

/// Ações na ordem: etapa, sinais, sentimento. Corta nas 4 primeiras, sem reordenar.
pub fn recommend_actions<L: Analyzable + ?Sized>(
    lead: &L,
    sentiment: Sentiment,
    counts: &SignalCounts,
) -> Vec<RecommendedAction> {
    use RecommendedAction::*;

    let mut actions = Vec::with_capacity(8);

    match lead.status() {
        LeadStatus::New => actions.extend([ContactSoon, PrepareInitialQuote]),
        LeadStatus::QuoteSent => actions.extend([FollowUpCallOnQuote, SendMarketingMaterial]),
        LeadStatus::NoAnswer => actions.extend([TryDifferentHours, SendSmsOrWhatsapp]),
        LeadStatus::ThinkingItOver => actions.extend([ScheduleFollowUp, SendBenefitInfo]),
        _ => {}
    }

    if counts.hesitation > 0 {
        actions.extend([AddressObjections, OfferIntroMeeting]);
    }
    if counts.urgency > 0 {
        actions.extend([PrioritizeLead, OfferFastTrack]);
    }
    if sentiment == Sentiment::Negative {
        actions.extend([ClarifyHesitationReasons, OfferSpecialIncentive]);
    }

    actions.truncate(MAX_ACTIONS);
    actions
}
