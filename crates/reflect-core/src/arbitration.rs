//! Arbitration between the local heuristic result and external model candidates.
//!
//! The local result is always computed first and is the answer unless an external
//! candidate scores at or above the acceptance threshold. Candidate source failures
//! and timeouts degrade to "no candidates"; they never reach the caller.

use crate::analyzer::ReflectionAnalyzer;
use crate::assembler::finish_line;
use crate::candidate::CandidateSource;
use crate::config::ScoringConfig;
use crate::error::ReflectionError;
use crate::model::{CandidateSummary, ReflectionAnalysis};
use crate::tags::normalize_list;
use crate::text::{normalize, word_tokens};
use std::collections::HashSet;
use std::sync::Arc;

/// Score for a candidate with no meaningful tokens; never adopted.
pub const EMPTY_CANDIDATE_SCORE: f64 = -999.0;

/// Boilerplate that generators tend to emit instead of summarizing.
const BANNED_FRAGMENTS: &[&str] = &[
    "기록이 짧아요",
    "한 줄만 더",
    "남겨보세요",
    "적어보세요",
    "핵심 흐름을 정리",
    "뚜렷한 감정 키워드 없음",
];

/// Textual quality of `summary` as a summary of `source`.
///
/// `1.2·overlap + 0.4·unique − 0.4·(1 − unique) − length_penalty`, where overlap is the
/// share of summary tokens found in the source and unique is the distinct-token share.
pub fn quality_score(summary: &str, source: &str, cfg: &ScoringConfig) -> f64 {
    let summary_tokens = word_tokens(summary);
    if summary_tokens.is_empty() {
        return EMPTY_CANDIDATE_SCORE;
    }
    let source_tokens: HashSet<String> = word_tokens(source).into_iter().collect();
    let total = summary_tokens.len() as f64;

    let overlap = summary_tokens.iter().filter(|t| source_tokens.contains(*t)).count() as f64 / total;
    let unique = summary_tokens.iter().collect::<HashSet<_>>().len() as f64 / total;
    let repetition = (1.0 - unique).max(0.0);
    let length = if summary.chars().count() > cfg.max_summary_chars {
        cfg.quality_length_penalty
    } else {
        0.0
    };

    overlap * 1.2 + unique * 0.4 - repetition * 0.4 - length
}

/// One line, banned fragments removed, whitespace collapsed.
pub fn refine_summary(summary: &str) -> String {
    let mut line = normalize(summary);
    for fragment in BANNED_FRAGMENTS {
        line = line.replace(fragment, "");
    }
    normalize(&line)
}

/// Index and score of the best candidate; the first one wins ties.
pub fn choose_best(candidates: &[CandidateSummary], source: &str, cfg: &ScoringConfig) -> Option<(usize, f64)> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (i, quality_score(&c.summary, source, cfg)))
        .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((i, score)),
        })
}

/// Entry point for persisting reflections: local analysis plus arbitration.
#[derive(Clone, Default)]
pub struct ReflectionAnalysisService {
    analyzer: ReflectionAnalyzer,
    source: Option<Arc<dyn CandidateSource>>,
}

impl std::fmt::Debug for ReflectionAnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflectionAnalysisService")
            .field("config", self.analyzer.config())
            .field("source", &self.source.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}

impl ReflectionAnalysisService {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            analyzer: ReflectionAnalyzer::new(config),
            source: None,
        }
    }

    /// Attach an external candidate generator used by [`Self::analyze_with_source`].
    pub fn with_source(mut self, source: Arc<dyn CandidateSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        self.analyzer.config()
    }

    /// Local analysis only.
    pub fn analyze_local(&self, content: &str, mood: Option<&str>) -> ReflectionAnalysis {
        self.analyzer.analyze(content, mood)
    }

    /// Local analysis arbitrated against already-produced candidates.
    pub fn analyze(
        &self,
        content: &str,
        mood: Option<&str>,
        candidates: &[CandidateSummary],
    ) -> ReflectionAnalysis {
        let local = self.analyzer.analyze(content, mood);
        self.arbitrate(content, local, candidates)
    }

    /// Local analysis, then candidates from the attached source within the configured
    /// timeout. Blank entries never reach the source.
    pub async fn analyze_with_source(&self, content: &str, mood: Option<&str>) -> ReflectionAnalysis {
        let local = self.analyzer.analyze(content, mood);
        let Some(source) = self.source.as_ref() else {
            return local;
        };
        if normalize(content).is_empty() {
            return local;
        }

        let timeout = self.config().candidate_timeout();
        let candidates = match tokio::time::timeout(timeout, source.produce_candidates(content, mood)).await {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(e)) => {
                tracing::warn!(
                    target: "reflect::arbitration",
                    source = source.name(),
                    error = %e,
                    "candidate source failed; using local reflection"
                );
                Vec::new()
            }
            Err(_) => {
                let e = ReflectionError::Timeout(self.config().candidate_timeout_ms);
                tracing::warn!(
                    target: "reflect::arbitration",
                    source = source.name(),
                    error = %e,
                    "candidate source timed out; using local reflection"
                );
                Vec::new()
            }
        };
        self.arbitrate(content, local, &candidates)
    }

    /// Pick the best refined candidate and adopt it if it clears the threshold (and the
    /// adoption margin over the local summary, when one is configured).
    pub fn arbitrate(
        &self,
        content: &str,
        local: ReflectionAnalysis,
        candidates: &[CandidateSummary],
    ) -> ReflectionAnalysis {
        if normalize(content).is_empty() {
            return local;
        }
        let cfg = self.config();
        let refined: Vec<CandidateSummary> = candidates
            .iter()
            .filter_map(|c| {
                let summary = finish_line(&refine_summary(&c.summary));
                (!summary.is_empty()).then(|| CandidateSummary::new(summary, c.emotion_tags.clone()))
            })
            .collect();

        let Some((index, score)) = choose_best(&refined, content, cfg) else {
            return local;
        };

        let mut required = cfg.acceptance_threshold;
        if let Some(margin) = cfg.adoption_margin {
            required = required.max(quality_score(&local.summary, content, cfg) + margin);
        }

        if score < required {
            tracing::debug!(
                target: "reflect::arbitration",
                candidates = refined.len(),
                best_score = score,
                required,
                "external candidate rejected"
            );
            return local;
        }

        let winner = &refined[index];
        tracing::info!(
            target: "reflect::arbitration",
            candidates = refined.len(),
            best_score = score,
            "external candidate adopted"
        );
        ReflectionAnalysis::new(winner.summary.clone(), normalize_list(&winner.emotion_tags, cfg.tag_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "Morning run along the river felt great. Finished the quarterly report before lunch. \
                          Dinner with my sister was relaxing.";

    fn candidate(summary: &str, tags: &[&str]) -> CandidateSummary {
        CandidateSummary::new(summary, tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn grounded_summary_beats_repetition() {
        let cfg = ScoringConfig::default();
        let a = quality_score("Morning run by the river, then finished the quarterly report", SOURCE, &cfg);
        let b = quality_score("river river river river river river", SOURCE, &cfg);
        assert!(a > b, "a={a} b={b}");
    }

    #[test]
    fn hallucinated_summary_scores_low() {
        let cfg = ScoringConfig::default();
        let score = quality_score("Skydiving over volcanoes in Iceland", SOURCE, &cfg);
        assert!(score < cfg.acceptance_threshold);
    }

    #[test]
    fn empty_candidate_gets_sentinel() {
        let cfg = ScoringConfig::default();
        assert_eq!(quality_score("", SOURCE, &cfg), EMPTY_CANDIDATE_SCORE);
        assert_eq!(quality_score("... the a", SOURCE, &cfg), EMPTY_CANDIDATE_SCORE);
    }

    #[test]
    fn long_summary_takes_length_penalty() {
        let cfg = ScoringConfig::default();
        let short = "quarterly report finished";
        let long = format!("{short}{}", " ".repeat(cfg.max_summary_chars));
        let delta = quality_score(short, SOURCE, &cfg) - quality_score(&long, SOURCE, &cfg);
        assert!((delta - cfg.quality_length_penalty).abs() < 1e-9);
    }

    #[test]
    fn refine_strips_boilerplate() {
        assert_eq!(refine_summary("산책을 했다.\n 한 줄만 더 남겨보세요"), "산책을 했다.");
        assert_eq!(refine_summary("기록이 짧아요"), "");
    }

    #[test]
    fn choose_best_prefers_first_on_tie() {
        let cfg = ScoringConfig::default();
        let cands = vec![candidate("quarterly report", &[]), candidate("quarterly report", &[])];
        assert_eq!(choose_best(&cands, SOURCE, &cfg).map(|(i, _)| i), Some(0));
        assert!(choose_best(&[], SOURCE, &cfg).is_none());
    }

    #[test]
    fn adopted_candidate_tags_are_normalized() {
        let service = ReflectionAnalysisService::default();
        let cands = vec![candidate(
            "Morning river run, quarterly report finished, relaxing dinner with sister",
            &["happy", "joy", "calm", "neutral", "focus", "tired"],
        )];
        let r = service.analyze(SOURCE, None, &cands);
        assert!(r.summary.starts_with("Morning river run"));
        assert!(r.summary.ends_with('.'));
        assert_eq!(r.emotion_tags, vec!["기쁨", "안정", "집중"]);
    }

    #[test]
    fn blank_content_never_adopts_candidates() {
        let cfg = ScoringConfig { acceptance_threshold: 0.3, ..ScoringConfig::default() };
        let service = ReflectionAnalysisService::new(cfg);
        let cands = vec![candidate("A quiet reflective evening", &["joy"])];
        for content in ["", "  \n\t "] {
            let r = service.analyze(content, None, &cands);
            assert_eq!(r.summary, crate::assembler::INSUFFICIENT_CONTENT);
            assert!(r.emotion_tags.is_empty());
        }
    }

    #[test]
    fn adoption_margin_can_keep_local() {
        let cfg = ScoringConfig { adoption_margin: Some(5.0), ..ScoringConfig::default() };
        let service = ReflectionAnalysisService::new(cfg);
        let cands = vec![candidate("Morning run along the river, quarterly report finished", &[])];
        let r = service.analyze(SOURCE, None, &cands);
        assert_eq!(r, service.analyze_local(SOURCE, None));
    }
}
