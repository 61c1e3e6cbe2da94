//! Scoring configuration for the reflection engine.
//!
//! Every bonus, penalty and threshold used by the pipeline lives here with its tuned
//! default, so deployments can override them without code edits.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | primary_clip | 72 | Max visible chars of the primary sentence. |
//! | context_clip | 46 | Max visible chars of the context sentence. |
//! | length_band_min / length_band_max | 16 / 80 | Sentence length band that earns the length bonus. |
//! | length_bonus / length_penalty | 0.3 / 0.2 | Inside / outside the band; the penalty must stay below 1. |
//! | position_bonus | 0.5 | First or last sentence of the entry. |
//! | similarity_threshold | 0.72 | Context must be below this Jaccard similarity to the primary. |
//! | tag_limit | 3 | Max emotion tags returned (at most 3). |
//! | max_summary_chars | 110 | Candidate summaries longer than this take the length penalty. |
//! | quality_length_penalty | 0.25 | Flat penalty for over-long candidates. |
//! | acceptance_threshold | 0.9 | Min quality score to adopt an external candidate. |
//! | adoption_margin | unset | If set, the candidate must also beat the local summary's score by this much. |
//! | assembly_mode | single_line | `single_line` or `structured`. |
//! | candidate_timeout_ms | 8000 | Budget for an external candidate source. |
//!
//! Loaded values are checked by [`ScoringConfig::validate`]; out-of-range keys are a
//! [`ReflectionError::Config`].

use crate::error::{ReflectionError, ReflectionResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard cap on emotion tags per reflection, whatever the configuration says.
pub const MAX_TAGS: usize = 3;

/// How the local summary is laid out. Chosen once per configuration, never per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyMode {
    /// One punctuated line: `primary; context (tag).`
    #[default]
    SingleLine,
    /// Three labelled lines: issue / context / emotion.
    Structured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub primary_clip: usize,
    pub context_clip: usize,
    pub length_band_min: usize,
    pub length_band_max: usize,
    pub length_bonus: f64,
    pub length_penalty: f64,
    pub position_bonus: f64,
    pub similarity_threshold: f64,
    pub tag_limit: usize,
    pub max_summary_chars: usize,
    pub quality_length_penalty: f64,
    pub acceptance_threshold: f64,
    pub adoption_margin: Option<f64>,
    pub assembly_mode: AssemblyMode,
    pub candidate_timeout_ms: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            primary_clip: 72,
            context_clip: 46,
            length_band_min: 16,
            length_band_max: 80,
            length_bonus: 0.3,
            length_penalty: 0.2,
            position_bonus: 0.5,
            similarity_threshold: 0.72,
            tag_limit: 3,
            max_summary_chars: 110,
            quality_length_penalty: 0.25,
            acceptance_threshold: 0.9,
            adoption_margin: None,
            assembly_mode: AssemblyMode::SingleLine,
            candidate_timeout_ms: 8_000,
        }
    }
}

impl ScoringConfig {
    /// Load from file and environment. Precedence: env `REFLECT__*` > file > defaults.
    /// The file path comes from `REFLECT_CONFIG` (default `config/reflect`, any format
    /// the `config` crate recognises by extension). A missing file is not an error.
    pub fn load() -> ReflectionResult<Self> {
        let path = std::env::var("REFLECT_CONFIG").unwrap_or_else(|_| "config/reflect".to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load with an explicit file path (environment overrides still apply).
    pub fn load_from(path: &Path) -> ReflectionResult<Self> {
        let builder = config::Config::builder();
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder.add_source(config::File::with_name(&path.to_string_lossy()).required(false))
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("REFLECT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = built.try_deserialize()?;
        cfg.validate()?;
        tracing::debug!(
            target: "reflect::config",
            acceptance_threshold = cfg.acceptance_threshold,
            similarity_threshold = cfg.similarity_threshold,
            mode = ?cfg.assembly_mode,
            "scoring config loaded"
        );
        Ok(cfg)
    }

    /// Reject values that would break the pipeline's guarantees: more than
    /// [`MAX_TAGS`] tags, or a length penalty large enough to push a sentence with
    /// content below an empty one (every contentful sentence starts above 1.0).
    pub fn validate(&self) -> ReflectionResult<()> {
        fn invalid(key: &str, why: &str) -> ReflectionResult<()> {
            Err(ReflectionError::Config(format!("{key}: {why}")))
        }

        if self.tag_limit > MAX_TAGS {
            return invalid("tag_limit", &format!("must be at most {MAX_TAGS}, got {}", self.tag_limit));
        }
        if !(0.0..1.0).contains(&self.length_penalty) {
            return invalid("length_penalty", "must be in [0, 1)");
        }
        if !(self.length_bonus >= 0.0 && self.position_bonus >= 0.0) {
            return invalid("length_bonus/position_bonus", "must be non-negative");
        }
        if self.length_band_min > self.length_band_max {
            return invalid("length_band_min", "must not exceed length_band_max");
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return invalid("similarity_threshold", "must be in [0, 1]");
        }
        if !(self.quality_length_penalty >= 0.0) {
            return invalid("quality_length_penalty", "must be non-negative");
        }
        if !self.acceptance_threshold.is_finite() || self.adoption_margin.is_some_and(|m| !m.is_finite()) {
            return invalid("acceptance_threshold/adoption_margin", "must be finite");
        }
        Ok(())
    }

    pub fn candidate_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.candidate_timeout_ms)
    }
}
