//! Emotion tag normalization into the canonical vocabulary.

use std::collections::HashSet;

/// Synonym groups: every alias (lowercase) resolves to the canonical label.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("기쁨", &["joy", "happy", "happiness", "delight", "기쁨"]),
    ("슬픔", &["sad", "sadness", "depressed", "sorrow", "슬픔"]),
    ("분노", &["anger", "angry", "frustration", "frustrated", "rage", "분노"]),
    ("불안", &["anxiety", "anxious", "worry", "worried", "fear", "nervous", "불안"]),
    ("안정", &["calm", "peace", "peaceful", "stable", "안정"]),
    ("집중", &["focus", "focused", "concentration", "집중"]),
    ("감사", &["gratitude", "grateful", "thanks", "thankful", "감사"]),
    ("피로", &["fatigue", "tired", "exhausted", "burnout", "피로"]),
];

/// Labels that mean "no particular emotion"; they are not tags.
const NEUTRAL: &[&str] = &["neutral", "중립"];

/// Placeholder some entries carry instead of a real emotion.
pub const PLACEHOLDER_TAG: &str = "감정기록";

/// Canonical form of one tag.
///
/// Empty and neutral labels yield `None`; unknown labels pass through trimmed.
pub fn normalize(tag: &str) -> Option<String> {
    let value = tag.trim();
    if value.is_empty() {
        return None;
    }
    let key = value.to_lowercase();
    if NEUTRAL.contains(&key.as_str()) {
        return None;
    }
    let canonical = SYNONYMS
        .iter()
        .find(|(_, aliases)| aliases.contains(&key.as_str()))
        .map(|(label, _)| label.to_string());
    Some(canonical.unwrap_or_else(|| value.to_string()))
}

/// Normalized, deduplicated tags in input order, at most `limit` of them.
/// Identity is case-insensitive, so pass-through labels differing only in case collapse.
pub fn normalize_list<S: AsRef<str>>(tags: &[S], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for tag in tags {
        if result.len() >= limit {
            break;
        }
        let Some(normalized) = normalize(tag.as_ref()) else {
            continue;
        };
        if seen.insert(normalized.to_lowercase()) {
            result.push(normalized);
        }
    }
    result
}

/// Normalized tags with duplicates kept, for frequency tallies across entries.
pub fn normalize_all<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter().filter_map(|t| normalize(t.as_ref())).collect()
}
