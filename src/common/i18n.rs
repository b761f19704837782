// src/common/i18n.rs

// Catálogo de mensagens. O produto roda em hebraico; inglês é o padrão
// quando o cliente não manda Accept-Language.

use crate::models::analysis::RecommendedAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Pt,
    He,
}

impl Lang {
    /// "pt" -> Pt, "he"/"iw" -> He, qualquer outro -> En.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "pt" => Lang::Pt,
            "he" | "iw" => Lang::He,
            _ => Lang::En,
        }
    }
}

pub fn message(key: &str, lang: Lang) -> &'static str {
    use Lang::*;

    match (key, lang) {
        ("validation_failed", En) => "One or more fields are invalid.",
        ("validation_failed", Pt) => "Um ou mais campos são inválidos.",
        ("validation_failed", He) => "שדה אחד או יותר אינו תקין.",

        ("invalid_lead_status", En) => "Unknown lead status.",
        ("invalid_lead_status", Pt) => "Status de lead desconhecido.",
        ("invalid_lead_status", He) => "סטטוס ליד לא מוכר.",

        ("invalid_role", En) => "Unknown user role.",
        ("invalid_role", Pt) => "Papel de usuário desconhecido.",
        ("invalid_role", He) => "תפקיד משתמש לא מוכר.",

        ("invalid_token", En) => "Invalid or missing authentication token.",
        ("invalid_token", Pt) => "Token de autenticação inválido ou ausente.",
        ("invalid_token", He) => "אסימון הזדהות חסר או לא תקין.",

        ("missing_tenant", En) => "The X-Tenant-ID header is required.",
        ("missing_tenant", Pt) => "O cabeçalho X-Tenant-ID é obrigatório.",
        ("missing_tenant", He) => "חסרה הכותרת X-Tenant-ID.",

        ("invalid_tenant", En) => "Invalid X-Tenant-ID header (not a UUID).",
        ("invalid_tenant", Pt) => "Cabeçalho X-Tenant-ID inválido (não é um UUID).",
        ("invalid_tenant", He) => "הכותרת X-Tenant-ID אינה תקינה.",

        ("not_tenant_member", En) => "You do not belong to this account.",
        ("not_tenant_member", Pt) => "Você não pertence a esta conta.",
        ("not_tenant_member", He) => "אינך משויך לחשבון זה.",

        ("lead_not_found", En) => "Lead not found.",
        ("lead_not_found", Pt) => "Lead não encontrado.",
        ("lead_not_found", He) => "הליד לא נמצא.",

        ("assignee_not_found", En) => "The selected representative does not exist.",
        ("assignee_not_found", Pt) => "O representante selecionado não existe.",
        ("assignee_not_found", He) => "הנציג שנבחר אינו קיים.",

        ("forbidden", En) => "You are not allowed to perform this action.",
        ("forbidden", Pt) => "Você não tem permissão para realizar esta ação.",
        ("forbidden", He) => "אין לך הרשאה לבצע פעולה זו.",

        ("empty_lead_selection", En) => "Select at least one lead.",
        ("empty_lead_selection", Pt) => "Selecione ao menos um lead.",
        ("empty_lead_selection", He) => "יש לבחור לפחות ליד אחד.",

        ("empty_assignee_selection", En) => "Select a representative.",
        ("empty_assignee_selection", Pt) => "Selecione um representante.",
        ("empty_assignee_selection", He) => "יש לבחור נציג.",

        (_, En) => "An unexpected error occurred.",
        (_, Pt) => "Ocorreu um erro inesperado.",
        (_, He) => "אירעה שגיאה בלתי צפויה.",
    }
}

pub fn action_label(action: RecommendedAction, lang: Lang) -> &'static str {
    use Lang::*;
    use RecommendedAction::*;

    match (action, lang) {
        (ContactSoon, En) => "Contact the lead soon",
        (ContactSoon, Pt) => "Entrar em contato em breve",
        (ContactSoon, He) => "ליצור קשר בהקדם",

        (PrepareInitialQuote, En) => "Prepare an initial quote",
        (PrepareInitialQuote, Pt) => "Preparar um orçamento inicial",
        (PrepareInitialQuote, He) => "להכין הצעת מחיר ראשונית",

        (FollowUpCallOnQuote, En) => "Follow-up call about the quote",
        (FollowUpCallOnQuote, Pt) => "Ligar para acompanhar o orçamento",
        (FollowUpCallOnQuote, He) => "שיחת מעקב על הצעת המחיר",

        (SendMarketingMaterial, En) => "Send more marketing material",
        (SendMarketingMaterial, Pt) => "Enviar mais material de marketing",
        (SendMarketingMaterial, He) => "לשלוח חומרים שיווקיים נוספים",

        (TryDifferentHours, En) => "Try calling at different hours",
        (TryDifferentHours, Pt) => "Tentar ligar em outros horários",
        (TryDifferentHours, He) => "לנסות להתקשר בשעות אחרות",

        (SendSmsOrWhatsapp, En) => "Send an SMS or WhatsApp message",
        (SendSmsOrWhatsapp, Pt) => "Enviar SMS ou WhatsApp",
        (SendSmsOrWhatsapp, He) => "לשלוח SMS או וואטסאפ",

        (ScheduleFollowUp, En) => "Schedule a follow-up",
        (ScheduleFollowUp, Pt) => "Agendar um retorno",
        (ScheduleFollowUp, He) => "לקבוע שיחת המשך",

        (SendBenefitInfo, En) => "Send more information about the benefits",
        (SendBenefitInfo, Pt) => "Enviar mais informações sobre os benefícios",
        (SendBenefitInfo, He) => "לשלוח מידע נוסף על היתרונות",

        (AddressObjections, En) => "Address the lead's objections",
        (AddressObjections, Pt) => "Tratar as objeções do lead",
        (AddressObjections, He) => "להתייחס להתנגדויות",

        (OfferIntroMeeting, En) => "Offer an introductory meeting",
        (OfferIntroMeeting, Pt) => "Oferecer uma reunião de apresentação",
        (OfferIntroMeeting, He) => "להציע פגישת היכרות",

        (PrioritizeLead, En) => "Prioritize this lead",
        (PrioritizeLead, Pt) => "Priorizar este lead",
        (PrioritizeLead, He) => "לתעדף את הליד",

        (OfferFastTrack, En) => "Offer a fast-track solution",
        (OfferFastTrack, Pt) => "Oferecer uma solução expressa",
        (OfferFastTrack, He) => "להציע פתרון מהיר",

        (ClarifyHesitationReasons, En) => "Clarify the reasons for hesitation",
        (ClarifyHesitationReasons, Pt) => "Esclarecer os motivos da hesitação",
        (ClarifyHesitationReasons, He) => "לברר את סיבות ההסתייגות",

        (OfferSpecialIncentive, En) => "Offer a special incentive",
        (OfferSpecialIncentive, Pt) => "Oferecer um incentivo especial",
        (OfferSpecialIncentive, He) => "להציע תמריץ מיוחד",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tags_fall_back_to_english() {
        assert_eq!(Lang::from_tag("he"), Lang::He);
        assert_eq!(Lang::from_tag("IW"), Lang::He);
        assert_eq!(Lang::from_tag("pt"), Lang::Pt);
        assert_eq!(Lang::from_tag("fr"), Lang::En);
    }

    #[test]
    fn unknown_keys_use_the_generic_message() {
        assert_eq!(message("no_such_key", Lang::En), "An unexpected error occurred.");
        assert_eq!(message("lead_not_found", Lang::He), "הליד לא נמצא.");
    }
}
