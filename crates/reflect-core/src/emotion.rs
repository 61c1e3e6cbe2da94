//! Emotion classifier: keyword rule table and mood-token tags.
//!
//! Rules are data, checked in table order; the order is the tie-break priority of the
//! detected list. Matching is a case-insensitive substring test, so Korean stems like
//! "행복" also catch "행복했다".

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct EmotionRule {
    pub tag: &'static str,
    pub keywords: &'static [&'static str],
}

pub const EMOTION_RULES: &[EmotionRule] = &[
    EmotionRule { tag: "안정", keywords: &["평온", "차분", "편안", "안정", "여유"] },
    EmotionRule { tag: "기쁨", keywords: &["행복", "기쁨", "웃", "설렘", "뿌듯", "즐거"] },
    EmotionRule { tag: "감사", keywords: &["감사", "고마", "든든", "따뜻"] },
    EmotionRule { tag: "피로", keywords: &["피곤", "지침", "지쳤", "무기력", "졸림"] },
    EmotionRule {
        tag: "불안",
        keywords: &["불안", "걱정", "초조", "긴장", "압박", "부담", "비용", "비싼", "언제", "출시"],
    },
    // Matching is by substring, so the one-syllable "화" also fires inside 대화, 영화,
    // 전화 and 화요일.
    EmotionRule {
        tag: "분노",
        keywords: &["화", "짜증", "분노", "답답", "억울", "멍청", "구려", "빡침"],
    },
    EmotionRule { tag: "슬픔", keywords: &["슬픔", "우울", "눈물", "외롭", "허무"] },
    EmotionRule { tag: "집중", keywords: &["몰입", "집중", "성취", "해냈", "완료"] },
];

/// Tags of every rule with a keyword occurring in `text`, in table order.
pub fn detect_tags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    EMOTION_RULES
        .iter()
        .filter(|rule| rule.keywords.iter().any(|k| lower.contains(&k.to_lowercase())))
        .map(|rule| rule.tag.to_string())
        .collect()
}

/// The closed set of mood markers an entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Joyful,
    Sad,
    Angry,
    Tired,
    Overwhelmed,
    Neutral,
}

impl Mood {
    /// Parse an emoji marker or a symbolic name. Anything else is "no mood".
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "🥰" | "😊" | "🥳" => Some(Mood::Joyful),
            "😔" => Some(Mood::Sad),
            "😡" => Some(Mood::Angry),
            "😴" => Some(Mood::Tired),
            "🤯" => Some(Mood::Overwhelmed),
            other => match other.to_lowercase().as_str() {
                "joyful" | "happy" => Some(Mood::Joyful),
                "sad" => Some(Mood::Sad),
                "angry" => Some(Mood::Angry),
                "tired" => Some(Mood::Tired),
                "overwhelmed" => Some(Mood::Overwhelmed),
                "neutral" | "unspecified" => Some(Mood::Neutral),
                _ => None,
            },
        }
    }

    /// Mood-derived tag appended by the analyzer.
    pub fn reflection_tag(self) -> Option<&'static str> {
        match self {
            Mood::Joyful => Some("긍정"),
            Mood::Sad => Some("침잠"),
            Mood::Angry => Some("격양"),
            Mood::Tired => Some("저에너지"),
            Mood::Overwhelmed => Some("과부하"),
            Mood::Neutral => None,
        }
    }

    /// Badge shown next to an entry: the mood expressed in the canonical vocabulary.
    pub fn badge_tag(self) -> Option<&'static str> {
        match self {
            Mood::Joyful => Some("기쁨"),
            Mood::Sad => Some("슬픔"),
            Mood::Angry => Some("분노"),
            Mood::Tired => Some("피로"),
            Mood::Overwhelmed => Some("과부하"),
            Mood::Neutral => None,
        }
    }
}

/// Analyzer tag for a raw mood token; unknown tokens map to `None`.
pub fn mood_tag(token: &str) -> Option<&'static str> {
    Mood::from_token(token).and_then(Mood::reflection_tag)
}

/// Badge list for an optional mood token (empty or one element).
pub fn badge_tags(token: Option<&str>) -> Vec<String> {
    token
        .and_then(Mood::from_token)
        .and_then(Mood::badge_tag)
        .map(|t| vec![t.to_string()])
        .unwrap_or_default()
}

/// Keyword tags followed by the mood tag, duplicates allowed.
pub fn classify(text: &str, mood: Option<&str>) -> Vec<String> {
    let mut tags = detect_tags(text);
    if let Some(tag) = mood.and_then(mood_tag) {
        tags.push(tag.to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_syllable_anger_keyword_matches_inside_words() {
        for text in ["친구와 대화를 나눴다", "영화를 봤다", "엄마와 전화했다", "화요일 아침"] {
            assert_eq!(detect_tags(text), vec!["분노"], "{text}");
        }
    }

    #[test]
    fn joy_keyword_detected() {
        assert_eq!(detect_tags("산책하면서 행복했다"), vec!["기쁨"]);
    }

    #[test]
    fn tags_follow_rule_order() {
        let tags = detect_tags("걱정이 많았지만 편안하게 마무리");
        assert_eq!(tags, vec!["안정", "불안"]);
    }

    #[test]
    fn no_keywords_no_tags() {
        assert!(detect_tags("went to the store").is_empty());
        assert!(detect_tags("").is_empty());
    }

    #[test]
    fn mood_tokens_map_to_tags() {
        assert_eq!(mood_tag("😊"), Some("긍정"));
        assert_eq!(mood_tag("tired"), Some("저에너지"));
        assert_eq!(mood_tag("🤯"), Some("과부하"));
        assert_eq!(mood_tag("neutral"), None);
        assert_eq!(mood_tag("🌈"), None);
    }

    #[test]
    fn badge_tags_use_canonical_labels() {
        assert_eq!(badge_tags(Some("😡")), vec!["분노"]);
        assert_eq!(badge_tags(Some("Sad")), vec!["슬픔"]);
        assert!(badge_tags(None).is_empty());
        assert!(badge_tags(Some("?")).is_empty());
    }

    #[test]
    fn classify_appends_mood_after_keywords() {
        assert_eq!(classify("몰입해서 완료했다", Some("🥳")), vec!["집중", "긍정"]);
    }
}
