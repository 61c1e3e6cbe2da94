//! Emotion frequency across many entries ("most common emotions this month").

use crate::tags::{normalize_all, PLACEHOLDER_TAG};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Most frequent canonical tags, count descending, first appearance breaking ties.
/// Duplicates across entries are counted; the placeholder tag is ignored.
pub fn top_tags<S: AsRef<str>>(tags: &[S], limit: usize) -> Vec<TagCount> {
    let filtered: Vec<&str> = tags
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| t.trim() != PLACEHOLDER_TAG)
        .collect();

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for tag in normalize_all(&filtered) {
        let slot = counts.entry(tag.clone()).or_insert(0);
        if *slot == 0 {
            order.push(tag);
        }
        *slot += 1;
    }

    let mut ranked: Vec<TagCount> = order
        .into_iter()
        .map(|tag| {
            let count = counts[&tag];
            TagCount { tag, count }
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Top three tags joined by `", "`, or `"-"` when there are none.
pub fn weekly_pattern<S: AsRef<str>>(tags: &[S]) -> String {
    let top = top_tags(tags, 3);
    if top.is_empty() {
        return "-".to_string();
    }
    top.into_iter().map(|t| t.tag).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_synonyms_together() {
        let tags = ["joy", "기쁨", "sad", "happy", "neutral", "감정기록", "불안", "sad"];
        let top = top_tags(&tags, 5);
        assert_eq!(
            top,
            vec![
                TagCount { tag: "기쁨".into(), count: 3 },
                TagCount { tag: "슬픔".into(), count: 2 },
                TagCount { tag: "불안".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn ties_keep_first_appearance() {
        let top = top_tags(&["calm", "focus", "focus", "calm", "tired"], 2);
        assert_eq!(top[0].tag, "안정");
        assert_eq!(top[1].tag, "집중");
    }

    #[test]
    fn weekly_pattern_formats() {
        assert_eq!(weekly_pattern(&["joy", "calm", "joy", "focus", "tired"]), "기쁨, 안정, 집중");
        let none: [&str; 0] = [];
        assert_eq!(weekly_pattern(&none), "-");
        assert_eq!(weekly_pattern(&["감정기록"]), "-");
    }
}
