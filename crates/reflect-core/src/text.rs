//! Tokenizer: whitespace normalization, sentence extraction, and meaningful word tokens.
//!
//! All functions are pure and total: empty or whitespace-only input yields empty output.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Sentence terminals (ASCII and full-width) plus line breaks.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?。！？\r\n]+").expect("valid sentence regex"));

/// Function words excluded from salience scoring (English and Korean).
const STOPWORDS: &[&str] = &[
    // English
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does", "doing",
    "for", "from", "had", "has", "have", "having", "he", "her", "here", "him", "his", "how", "if",
    "in", "into", "is", "it", "its", "just", "me", "more", "my", "no", "not", "of", "on", "or",
    "our", "out", "she", "so", "some", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "to", "too", "up", "us", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "why", "will", "with", "would", "you",
    "your", "really", "today",
    // Korean
    "그리고", "그래서", "그러나", "하지만", "그런데", "그냥", "정말", "너무", "진짜", "오늘",
    "나는", "내가", "나의", "우리", "저는", "제가", "이것", "그것", "저것", "것이", "것을",
    "때문에", "있다", "있었다", "했다", "하는", "하고", "해서", "그게", "이제", "조금", "약간",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Collapse every whitespace run (newlines and tabs included) to one space and trim.
pub fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Split into sentences on `. ! ? 。 ！ ？` and line breaks.
/// Each piece is whitespace-normalized; empty pieces are dropped.
pub fn extract_sentences(text: &str) -> Vec<String> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(normalize)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercased meaningful word tokens.
///
/// A token survives if it has at least two chars, is not purely numeric, contains an
/// alphabetic char, and is not a stopword.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .filter(|t| is_meaningful(t))
        .collect()
}

fn is_meaningful(token: &str) -> bool {
    token.chars().count() >= 2
        && !token.chars().all(|c| c.is_numeric())
        && token.chars().any(|c| c.is_alphabetic())
        && !is_stopword(token)
}

/// Distinct tokens of `text`, for set comparisons.
pub fn token_set(text: &str) -> HashSet<String> {
    word_tokens(text).into_iter().collect()
}

/// Clip to `limit` chars, appending `...` when anything was cut.
pub fn clip(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_all_whitespace() {
        assert_eq!(normalize("  a\n\n b\t\tc  "), "a b c");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn sentences_split_on_ascii_cjk_and_newlines() {
        let s = extract_sentences("첫 문장이다. 두번째!  세번째？\n네번째 줄\n\n...");
        assert_eq!(s, vec!["첫 문장이다", "두번째", "세번째", "네번째 줄"]);
    }

    #[test]
    fn sentences_of_blank_input_are_empty() {
        assert!(extract_sentences("").is_empty());
        assert!(extract_sentences("   \n ").is_empty());
        assert!(extract_sentences("?!.").is_empty());
    }

    #[test]
    fn tokens_filter_numbers_stopwords_and_short_words() {
        let t = word_tokens("The 2024 release was GREAT, a 3rd try: x 42!");
        assert_eq!(t, vec!["release", "great", "3rd", "try"]);
    }

    #[test]
    fn tokens_keep_hangul() {
        let t = word_tokens("오늘 산책이 행복했다. 정말 좋았다");
        assert_eq!(t, vec!["산책이", "행복했다", "좋았다"]);
    }

    #[test]
    fn clip_counts_chars_not_bytes() {
        assert_eq!(clip("가나다라마", 3), "가나다...");
        assert_eq!(clip("short", 10), "short");
    }
}
