// src/models/analysis.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::common::i18n::{self, Lang};
use crate::models::lead::{Lead, LeadStatus};

/// Contagem de sinais por léxico. Calculada a cada chamada, nunca persistida.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SignalCounts {
    pub positive: u32,
    pub negative: u32,
    pub hesitation: u32,
    pub urgency: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Rótulo grosso derivado do score. A ordem das variantes é o ranking
/// (cold < medium < promising < hot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Cold,
    Medium,
    Promising,
    Hot,
}

impl Classification {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Classification::Hot,
            60.. => Classification::Promising,
            40.. => Classification::Medium,
            _ => Classification::Cold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendedAction {
    ContactSoon,
    PrepareInitialQuote,
    FollowUpCallOnQuote,
    SendMarketingMaterial,
    TryDifferentHours,
    SendSmsOrWhatsapp,
    ScheduleFollowUp,
    SendBenefitInfo,
    AddressObjections,
    OfferIntroMeeting,
    PrioritizeLead,
    OfferFastTrack,
    ClarifyHesitationReasons,
    OfferSpecialIncentive,
}

impl RecommendedAction {
    pub fn label(self, lang: Lang) -> &'static str {
        i18n::action_label(self, lang)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub classification: Classification,
    #[schema(example = 75, maximum = 100)]
    pub potential_score: u8,
    pub recommended_actions: Vec<RecommendedAction>,
    /// `null` quando o preditor mantém o status atual.
    pub next_status: Option<LeadStatus>,
}

/// Resultado com os rótulos das ações no idioma do cliente.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedAnalysis {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub action_labels: Vec<String>,
}

impl LocalizedAnalysis {
    pub fn new(result: AnalysisResult, lang: Lang) -> Self {
        let action_labels = result
            .recommended_actions
            .iter()
            .map(|action| action.label(lang).to_string())
            .collect();
        Self { result, action_labels }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadWithAnalysis {
    #[serde(flatten)]
    pub lead: Lead,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextStatusPrediction {
    pub current_status: LeadStatus,
    pub next_status: LeadStatus,
}
