//! Summary assembly: primary, context and leading emotion composed into one line, or
//! into the structured three-line layout when configured.

use crate::config::{AssemblyMode, ScoringConfig};
use crate::text::{clip, normalize};

/// Single-line summary for entries with no usable content.
pub const INSUFFICIENT_CONTENT: &str = "기록 내용이 짧아 핵심 이슈를 특정하기 어려움.";

/// Structured summary for entries with no usable content.
pub const INSUFFICIENT_CONTENT_STRUCTURED: &str = "1. 핵심 이슈: 기록 내용이 짧아 핵심 이슈를 특정하기 어려움\n2. 상황 맥락: 오늘 있었던 구체적인 장면이 더 필요함\n3. 감정 흐름: 감정 단서가 충분하지 않음";

const STRUCTURED_NO_CONTEXT: &str = "기록된 내용을 바탕으로 원인과 흐름을 점검함";
const STRUCTURED_NO_EMOTION: &str = "감정 표현이 비교적 중립적임";

const TERMINALS: [char; 3] = ['.', '!', '?'];

/// The fixed summary for an empty entry in the given mode.
pub fn insufficient(mode: AssemblyMode) -> &'static str {
    match mode {
        AssemblyMode::SingleLine => INSUFFICIENT_CONTENT,
        AssemblyMode::Structured => INSUFFICIENT_CONTENT_STRUCTURED,
    }
}

/// Compose the summary for a non-empty entry.
pub fn assemble(primary: &str, context: Option<&str>, tags: &[String], cfg: &ScoringConfig) -> String {
    match cfg.assembly_mode {
        AssemblyMode::SingleLine => single_line(primary, context, tags, cfg),
        AssemblyMode::Structured => structured(primary, context, tags, cfg),
    }
}

fn single_line(primary: &str, context: Option<&str>, tags: &[String], cfg: &ScoringConfig) -> String {
    let mut line = clip(&normalize(primary), cfg.primary_clip);
    if let Some(context) = context {
        line.push_str("; ");
        line.push_str(&clip(&normalize(context), cfg.context_clip));
    }
    if let Some(tag) = tags.first() {
        line.push_str(" (");
        line.push_str(tag);
        line.push(')');
    }
    finish_line(&line)
}

fn structured(primary: &str, context: Option<&str>, tags: &[String], cfg: &ScoringConfig) -> String {
    let issue = clip(&normalize(primary), cfg.primary_clip);
    let context = context
        .map(|c| clip(&normalize(c), cfg.context_clip))
        .unwrap_or_else(|| STRUCTURED_NO_CONTEXT.to_string());
    let emotion = tags.first().map(String::as_str).unwrap_or(STRUCTURED_NO_EMOTION);
    format!("1. 핵심 이슈: {issue}\n2. 상황 맥락: {context}\n3. 감정 흐름: {emotion}")
}

/// Collapse to one trimmed line and make sure it ends in `.`, `!` or `?`.
/// Blank input stays blank.
pub fn finish_line(line: &str) -> String {
    let mut out = normalize(line);
    if out.is_empty() {
        return out;
    }
    if !out.ends_with(TERMINALS) {
        out.push('.');
    }
    out
}
