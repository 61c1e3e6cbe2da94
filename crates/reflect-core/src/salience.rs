//! Salience scoring: keyword frequency weights and per-sentence importance.

use crate::config::ScoringConfig;
use crate::text::word_tokens;
use std::collections::{HashMap, HashSet};

/// Token frequency over the whole text. Weights are `f64` so they can be blended later.
pub fn keyword_weights(text: &str) -> HashMap<String, f64> {
    let mut weights = HashMap::new();
    for token in word_tokens(text) {
        *weights.entry(token).or_insert(0.0) += 1.0;
    }
    weights
}

/// Importance of one sentence.
///
/// Sum of keyword weights, plus the distinct/total token ratio, plus a flat bonus for the
/// first or last sentence, plus a length bonus inside the configured band (penalty
/// outside). A sentence with no meaningful tokens scores exactly 0.
pub fn score(
    sentence: &str,
    index: usize,
    total_sentences: usize,
    weights: &HashMap<String, f64>,
    cfg: &ScoringConfig,
) -> f64 {
    let tokens = word_tokens(sentence);
    if tokens.is_empty() {
        return 0.0;
    }

    let keyword: f64 = tokens.iter().map(|t| weights.get(t).copied().unwrap_or(0.0)).sum();

    let distinct = tokens.iter().collect::<HashSet<_>>().len();
    let uniqueness = distinct as f64 / tokens.len() as f64;

    let is_edge = index == 0 || index + 1 == total_sentences;
    let position = if is_edge { cfg.position_bonus } else { 0.0 };

    let chars = sentence.chars().count();
    let length = if (cfg.length_band_min..=cfg.length_band_max).contains(&chars) {
        cfg.length_bonus
    } else {
        -cfg.length_penalty
    };

    keyword + uniqueness + position + length
}
