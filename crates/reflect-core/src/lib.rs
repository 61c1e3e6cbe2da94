//! reflect-core: the reflection engine of the diary.
//!
//! Given an entry's text and optional mood marker, builds a one-line summary and up to
//! three canonical emotion tags with a deterministic local heuristic, then arbitrates
//! against optional external model candidates.
//!
//! ```text
//! text ─► text (sentences, tokens) ─► salience ─► selector ─┐
//!    └──► emotion (rules + mood) ─► tags (normalize) ───────┴─► assembler ─► local
//! candidates ─► arbitration (quality score, threshold) ◄────────────────────┘
//! ```

pub mod analyzer;
pub mod arbitration;
pub mod assembler;
pub mod candidate;
pub mod config;
pub mod emotion;
pub mod error;
mod model;
pub mod prompts;
pub mod salience;
pub mod selector;
pub mod stats;
pub mod tags;
pub mod text;

pub use analyzer::ReflectionAnalyzer;
pub use arbitration::{quality_score, ReflectionAnalysisService};
pub use candidate::{CandidateSource, OpenRouterCandidateSource, StaticCandidates};
pub use config::{AssemblyMode, ScoringConfig};
pub use emotion::{EmotionRule, Mood};
pub use error::{ReflectionError, ReflectionResult};
pub use model::{CandidateSummary, ReflectionAnalysis};
pub use stats::{top_tags, weekly_pattern, TagCount};
