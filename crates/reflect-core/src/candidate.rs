//! **Candidate sources**: external generators of reflection summaries.
//!
//! Implement `CandidateSource` for any generative backend. The service treats every
//! failure as "no candidates", so a backend may simply return `Err` on network or
//! decoding problems. `StaticCandidates` serves fixed candidates (tests, replay);
//! `OpenRouterCandidateSource` asks an OpenAI-compatible chat endpoint.

use crate::error::{ReflectionError, ReflectionResult};
use crate::model::CandidateSummary;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct";
const SUMMARY_STYLE: &str = "사실 요약형";
const DEFAULT_ATTEMPTS: usize = 2;

/// Produces zero or more candidate summaries for one entry.
#[async_trait::async_trait]
pub trait CandidateSource: Send + Sync {
    fn name(&self) -> &str;

    async fn produce_candidates(
        &self,
        content: &str,
        mood: Option<&str>,
    ) -> ReflectionResult<Vec<CandidateSummary>>;
}

/// Returns the same candidates for every entry.
#[derive(Debug, Clone, Default)]
pub struct StaticCandidates {
    candidates: Vec<CandidateSummary>,
}

impl StaticCandidates {
    pub fn new(candidates: Vec<CandidateSummary>) -> Self {
        Self { candidates }
    }
}

#[async_trait::async_trait]
impl CandidateSource for StaticCandidates {
    fn name(&self) -> &str {
        "static"
    }

    async fn produce_candidates(
        &self,
        _content: &str,
        _mood: Option<&str>,
    ) -> ReflectionResult<Vec<CandidateSummary>> {
        Ok(self.candidates.clone())
    }
}

/// The outermost `{ ... }` span of `text`, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    (first < last).then(|| &text[first..=last])
}

/// Decode a model reply into a candidate: `{"summary": "...", "emotionTags": [...]}`
/// possibly wrapped in prose or code fences. Tags are trimmed, blanks dropped, max 3.
pub fn parse_candidate(raw: &str) -> ReflectionResult<CandidateSummary> {
    let json = extract_json_object(raw)
        .ok_or_else(|| ReflectionError::Candidate("no JSON object in model reply".to_string()))?;
    let mut candidate: CandidateSummary = serde_json::from_str(json)?;
    candidate.emotion_tags = candidate
        .emotion_tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(3)
        .map(str::to_string)
        .collect();
    Ok(candidate)
}

/// Fixed-style summarization prompt sent to the generator.
pub fn build_prompt(content: &str, mood: Option<&str>) -> String {
    format!(
        "너는 일기 요약 도우미다.\n\
         스타일은 반드시 {SUMMARY_STYLE}로 고정한다.\n\
         입력된 일기를 기반으로 다음 JSON만 출력해라.\n\
         규칙:\n\
         - summary: 반드시 한 줄. 자연스러운 한국어 문장으로 작성.\n\
         - 원문 문장을 그대로 길게 복붙하지 말고 핵심만 압축.\n\
         - emotionTags: 감정 태그 0~3개. 없으면 빈 배열.\n\
         - 출력은 JSON 객체 하나만.\n\n\
         입력:\n\
         mood: {}\n\
         content: {}\n\n\
         JSON 스키마:\n\
         {{\"summary\":\"string\",\"emotionTags\":[\"string\"]}}",
        mood.unwrap_or("없음"),
        content
    )
}

// OpenAI-compatible request/response for OpenRouter
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Candidate generator backed by OpenRouter chat completions.
/// Each attempt is one completion; malformed replies are skipped, not fatal.
pub struct OpenRouterCandidateSource {
    api_key: String,
    model: String,
    base_url: String,
    attempts: usize,
    client: reqwest::Client,
}

impl OpenRouterCandidateSource {
    /// Build from environment: `OPENROUTER_API_KEY` (required), `REFLECT_MODEL`,
    /// `REFLECT_API_BASE`. Returns `None` when no key is configured.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("OPENROUTER_API_KEY").ok()?.trim().to_string();
        if key.is_empty() {
            return None;
        }
        let mut source = Self::new(key);
        if let Ok(model) = std::env::var("REFLECT_MODEL") {
            source = source.with_model(&model);
        }
        if let Ok(base) = std::env::var("REFLECT_API_BASE") {
            source = source.with_base_url(&base);
        }
        Some(source)
    }

    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key: api_key.trim().to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: OPENROUTER_API_BASE.to_string(),
            attempts: DEFAULT_ATTEMPTS,
            client,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Point at another OpenAI-compatible endpoint (proxy, self-hosted gateway).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    async fn complete(&self, prompt: &str) -> ReflectionResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(0.3),
            max_tokens: Some(256),
        };

        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Title", "Reflect-Candidate-Source")
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ReflectionError::Candidate(format!("OpenRouter API error {}: {}", status, body)));
        }

        let parsed: ChatResponse = res.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ReflectionError::Candidate("empty choices".to_string()))
    }
}

#[async_trait::async_trait]
impl CandidateSource for OpenRouterCandidateSource {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn produce_candidates(
        &self,
        content: &str,
        mood: Option<&str>,
    ) -> ReflectionResult<Vec<CandidateSummary>> {
        let prompt = build_prompt(content, mood);
        let mut candidates = Vec::new();
        for attempt in 0..self.attempts {
            let raw = self.complete(&prompt).await?;
            match parse_candidate(&raw) {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => tracing::debug!(
                    target: "reflect::candidate",
                    attempt,
                    error = %e,
                    "skipping malformed model reply"
                ),
            }
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_wrapped_json() {
        let raw = "물론이죠!\n```json\n{\"summary\":\"산책을 했다\",\"emotionTags\":[\" 기쁨 \",\"\",\"calm\",\"a\",\"b\"]}\n```";
        let c = parse_candidate(raw).unwrap();
        assert_eq!(c.summary, "산책을 했다");
        assert_eq!(c.emotion_tags, vec!["기쁨", "calm", "a"]);
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let c = parse_candidate("{\"summary\":\"ok\"}").unwrap();
        assert!(c.emotion_tags.is_empty());
    }

    #[test]
    fn rejects_replies_without_object() {
        assert!(matches!(parse_candidate("no json here"), Err(ReflectionError::Candidate(_))));
        assert!(matches!(parse_candidate("} backwards {"), Err(ReflectionError::Candidate(_))));
        assert!(matches!(parse_candidate("{\"summary\": 3}"), Err(ReflectionError::Json(_))));
    }

    #[test]
    fn prompt_carries_mood_and_content() {
        let p = build_prompt("비가 왔다", None);
        assert!(p.contains("mood: 없음"));
        assert!(p.contains("content: 비가 왔다"));
        assert!(p.contains("{\"summary\":\"string\",\"emotionTags\":[\"string\"]}"));
    }

    #[tokio::test]
    async fn static_source_returns_its_candidates() {
        let source = StaticCandidates::new(vec![CandidateSummary::new("x", vec![])]);
        let got = source.produce_candidates("anything", None).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(source.name(), "static");
    }
}
