// src/services/analysis.rs

//! Motor de análise de leads: conta sinais nas notas, calcula o score,
//! classifica o sentimento, recomenda ações e sugere a próxima etapa.
//!
//! Tudo aqui é função pura de (status, notas). Nada é cacheado: cada chamada
//! recalcula do zero.

pub mod lexicon;
pub mod predict;
pub mod recommend;
pub mod scoring;
pub mod sentiment;
pub mod signals;

pub use predict::predict_next_status;
pub use signals::count_signals;

use crate::models::{
    analysis::{AnalysisResult, Classification, Sentiment},
    lead::{Lead, LeadSnapshot, LeadStatus},
};

/// O que o motor precisa de um lead.
pub trait Analyzable {
    fn status(&self) -> LeadStatus;

    /// Notas vazias ou só com espaços contam como ausentes.
    fn raw_notes(&self) -> Option<&str>;

    fn notes(&self) -> Option<&str> {
        self.raw_notes().filter(|n| !n.trim().is_empty())
    }
}

impl Analyzable for Lead {
    fn status(&self) -> LeadStatus {
        self.status
    }

    fn raw_notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

impl Analyzable for LeadSnapshot {
    fn status(&self) -> LeadStatus {
        self.status
    }

    fn raw_notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

pub fn analyze_lead<L: Analyzable + ?Sized>(lead: &L) -> AnalysisResult {
    let status = lead.status();
    let notes = lead.notes();
    let counts = notes.map(count_signals);

    let potential_score = scoring::score_from(status, counts.as_ref());
    let sentiment = match (notes, counts.as_ref()) {
        (Some(text), Some(c)) => sentiment::sentiment_from(text, c),
        _ => Sentiment::Neutral,
    };
    let recommended_actions =
        recommend::recommend_actions(lead, sentiment, &counts.unwrap_or_default());
    let next = predict::next_status_from(status, sentiment, potential_score);

    tracing::debug!(
        status = %status,
        score = potential_score,
        ?sentiment,
        "lead analisado"
    );

    AnalysisResult {
        sentiment,
        classification: Classification::from_score(potential_score),
        potential_score,
        recommended_actions,
        next_status: (next != status).then_some(next),
    }
}
