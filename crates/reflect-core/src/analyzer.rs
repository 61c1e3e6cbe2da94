//! Local heuristic analysis: the guaranteed fallback of every reflection.
//!
//! text → sentences + keyword weights → ranked selection → emotion tags → assembled line.
//! Deterministic and infallible; raw entry text is never logged.

use crate::assembler;
use crate::config::ScoringConfig;
use crate::emotion;
use crate::model::ReflectionAnalysis;
use crate::salience::keyword_weights;
use crate::selector::Selection;
use crate::tags::normalize_list;
use crate::text::{extract_sentences, normalize};

#[derive(Debug, Clone, Default)]
pub struct ReflectionAnalyzer {
    config: ScoringConfig,
}

impl ReflectionAnalyzer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn analyze(&self, content: &str, mood: Option<&str>) -> ReflectionAnalysis {
        let cfg = &self.config;
        let cleaned = normalize(content);
        if cleaned.is_empty() {
            return ReflectionAnalysis::new(assembler::insufficient(cfg.assembly_mode), Vec::new());
        }

        let sentences = extract_sentences(content);
        let weights = keyword_weights(&cleaned);
        let selection = Selection::new(&sentences, &weights, cfg);
        let primary = selection.choose_primary(&cleaned);
        let context = selection.choose_context(cfg.similarity_threshold);

        let detected = emotion::classify(&cleaned, mood);
        let tags = normalize_list(&detected, cfg.tag_limit);
        let summary = assembler::assemble(primary, context, &tags, cfg);

        tracing::debug!(
            target: "reflect::analyzer",
            sentences = sentences.len(),
            keywords = weights.len(),
            has_context = context.is_some(),
            tags = ?tags,
            "local reflection built"
        );

        ReflectionAnalysis::new(summary, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entry_gets_insufficient_summary() {
        let a = ReflectionAnalyzer::default();
        let r = a.analyze("", Some("😊"));
        assert_eq!(r.summary, assembler::INSUFFICIENT_CONTENT);
        assert!(r.emotion_tags.is_empty());
        assert_eq!(a.analyze(" \n\t", None).summary, assembler::INSUFFICIENT_CONTENT);
    }

    #[test]
    fn single_sentence_has_no_separator() {
        let r = ReflectionAnalyzer::default().analyze("공원에서 오래 산책하며 행복했다", None);
        assert!(!r.summary.contains(';'));
        assert_eq!(r.summary, "공원에서 오래 산책하며 행복했다 (기쁨).");
        assert_eq!(r.emotion_tags, vec!["기쁨"]);
    }

    #[test]
    fn mood_tag_follows_keyword_tags_and_cap_applies() {
        let r = ReflectionAnalyzer::default().analyze(
            "편안한 아침이었다. 친구에게 고마웠다. 회의는 걱정됐다. 밤에는 피곤했다.",
            Some("😴"),
        );
        assert_eq!(r.emotion_tags, vec!["안정", "감사", "피로"]);
    }

    #[test]
    fn punctuation_only_entry_still_terminates() {
        let r = ReflectionAnalyzer::default().analyze("?!", None);
        assert!(!r.summary.is_empty());
        assert!(r.summary.ends_with(['.', '!', '?']));
    }
}
