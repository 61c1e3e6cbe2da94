//! Sentence selection: rank by salience, pick a primary, then a dissimilar context line.

use crate::config::ScoringConfig;
use crate::salience;
use crate::text::token_set;
use std::collections::{HashMap, HashSet};

/// `|A ∩ B| / |A ∪ B|`; two empty sets are identical (1.0).
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Sentence indices best-first. Stable: equal scores keep ascending index order.
pub fn rank_sentences(
    sentences: &[String],
    weights: &HashMap<String, f64>,
    cfg: &ScoringConfig,
) -> Vec<usize> {
    let total = sentences.len();
    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| (i, salience::score(s, i, total, weights, cfg)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(i, _)| i).collect()
}

/// Ranked sentences of one entry, with primary/context choice.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    sentences: &'a [String],
    ranking: Vec<usize>,
}

impl<'a> Selection<'a> {
    pub fn new(sentences: &'a [String], weights: &HashMap<String, f64>, cfg: &ScoringConfig) -> Self {
        let ranking = rank_sentences(sentences, weights, cfg);
        Self { sentences, ranking }
    }

    pub fn ranking(&self) -> &[usize] {
        &self.ranking
    }

    /// Index of the best sentence, if any.
    pub fn primary_index(&self) -> Option<usize> {
        self.ranking.first().copied()
    }

    /// The best sentence, or `source` itself when no sentence was extracted.
    pub fn choose_primary<'s>(&'s self, source: &'s str) -> &'s str {
        match self.primary_index() {
            Some(i) => self.sentences[i].as_str(),
            None => source,
        }
    }

    /// First ranked non-primary sentence whose token-set similarity to the primary is
    /// below `threshold`; otherwise the first non-primary sentence in original order.
    pub fn choose_context(&self, threshold: f64) -> Option<&'a str> {
        let primary = self.primary_index()?;
        if self.sentences.len() < 2 {
            return None;
        }
        let primary_tokens = token_set(&self.sentences[primary]);

        let dissimilar = self
            .ranking
            .iter()
            .copied()
            .filter(|&i| i != primary)
            .find(|&i| jaccard(&primary_tokens, &token_set(&self.sentences[i])) < threshold);

        let chosen = dissimilar.or_else(|| (0..self.sentences.len()).find(|&i| i != primary))?;
        Some(self.sentences[chosen].as_str())
    }
}
