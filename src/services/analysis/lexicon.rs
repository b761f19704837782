// src/services/analysis/lexicon.rs

use std::{collections::HashSet, sync::LazyLock};

// Entradas já em minúsculas. Hebraico primeiro (idioma do produto), depois inglês.
// As entradas com espaço nunca casam na contagem por token; ficam aqui porque
// fazem parte do vocabulário do produto.

const POSITIVE: &[&str] = &[
    "מעוניין", "מעוניינת", "מעוניינים", "מצוין", "מצוינת", "מעולה", "נהדר", "אשמח",
    "רוצה", "מתאים", "מתאימה", "חיובי", "מרוצה", "בהחלט", "אהב", "אהבה", "סגור",
    "interested", "great", "excellent", "perfect", "definitely", "happy", "love", "yes",
];

const NEGATIVE: &[&str] = &[
    "יקר", "יקרה", "גרוע", "בעיה", "בעיות", "מאוכזב", "מאוכזבת", "לבטל", "ביטול",
    "מתחרה", "רע", "כועס", "לא מעוניין",
    "expensive", "problem", "bad", "cancel", "disappointed", "angry", "competitor",
    "not interested",
];

const HESITATION: &[&str] = &[
    "אולי", "לחשוב", "אחשוב", "נחשוב", "מתלבט", "מתלבטת", "להתייעץ", "אתייעץ",
    "בהמשך", "נראה", "לא בטוח",
    "maybe", "perhaps", "think", "later", "unsure", "consult", "hesitant",
    "not sure",
];

const URGENCY: &[&str] = &[
    "דחוף", "דחופה", "מיד", "מיידי", "עכשיו", "היום", "מהר", "בהקדם", "השבוע",
    "urgent", "asap", "immediately", "now", "today", "quickly", "soon",
];

/// Frases que forçam sentimento negativo (busca por substring, sem tokenizar).
pub const STRONG_NEGATIVE_PHRASES: &[&str] = &[
    "לא רציני", "לא רצינית", "הבריז", "הבריזה", "לא מעוניין", "לא מעוניינת",
    "not serious", "blew us off", "not interested",
];

pub struct Lexicon {
    pub positive: HashSet<&'static str>,
    pub negative: HashSet<&'static str>,
    pub hesitation: HashSet<&'static str>,
    pub urgency: HashSet<&'static str>,
}

/// Construído uma vez, imutável pelo resto do processo.
pub static LEXICON: LazyLock<Lexicon> = LazyLock::new(|| Lexicon {
    positive: POSITIVE.iter().copied().collect(),
    negative: NEGATIVE.iter().copied().collect(),
    hesitation: HESITATION.iter().copied().collect(),
    urgency: URGENCY.iter().copied().collect(),
});
