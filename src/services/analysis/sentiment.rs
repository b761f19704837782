// src/services/analysis/sentiment.rs

use crate::models::analysis::{Sentiment, SignalCounts};
use crate::services::analysis::{lexicon::STRONG_NEGATIVE_PHRASES, signals::count_signals, Analyzable};

const POSITIVE_RATIO: f64 = 0.6;
const NEGATIVE_RATIO: f64 = 0.3;

pub fn classify_sentiment<L: Analyzable + ?Sized>(lead: &L) -> Sentiment {
    match lead.notes() {
        Some(notes) => sentiment_from(notes, &count_signals(notes)),
        None => Sentiment::Neutral,
    }
}

pub(crate) fn sentiment_from(notes: &str, counts: &SignalCounts) -> Sentiment {
    // A frase forte vence qualquer proporção
    if STRONG_NEGATIVE_PHRASES.iter().any(|phrase| notes.contains(phrase)) {
        return Sentiment::Negative;
    }

    let total = u64::from(counts.positive) + u64::from(counts.negative) + u64::from(counts.hesitation);
    if total == 0 {
        return Sentiment::Neutral;
    }

    let positive_ratio = f64::from(counts.positive) / total as f64;
    if positive_ratio > POSITIVE_RATIO {
        Sentiment::Positive
    } else if positive_ratio < NEGATIVE_RATIO {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
