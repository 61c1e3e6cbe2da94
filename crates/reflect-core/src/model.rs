use serde::{Deserialize, Serialize};

/// Result of analyzing one diary entry: a one-line summary and at most three canonical
/// emotion tags. Produced fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionAnalysis {
    pub summary: String,
    #[serde(rename = "emotionTags")]
    pub emotion_tags: Vec<String>,
}

impl ReflectionAnalysis {
    pub fn new(summary: impl Into<String>, emotion_tags: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            emotion_tags,
        }
    }
}

/// A summary/tags pair from an external generator, not yet accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub summary: String,
    #[serde(rename = "emotionTags", default)]
    pub emotion_tags: Vec<String>,
}

impl CandidateSummary {
    pub fn new(summary: impl Into<String>, emotion_tags: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            emotion_tags,
        }
    }
}
