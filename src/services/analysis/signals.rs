// src/services/analysis/signals.rs

use crate::models::analysis::SignalCounts;
use crate::services::analysis::lexicon::LEXICON;

/// Conta os sinais de um texto livre: separa por espaço, coloca em minúsculas
/// e soma um para cada léxico que contém o token exato. Pontuação não é removida.
pub fn count_signals(text: &str) -> SignalCounts {
    let lexicon = &*LEXICON;
    let mut counts = SignalCounts::default();

    for token in text.split_whitespace().map(str::to_lowercase) {
        let token = token.as_str();
        if lexicon.positive.contains(token) {
            counts.positive += 1;
        }
        if lexicon.negative.contains(token) {
            counts.negative += 1;
        }
        if lexicon.hesitation.contains(token) {
            counts.hesitation += 1;
        }
        if lexicon.urgency.contains(token) {
            counts.urgency += 1;
        }
    }

    counts
}
