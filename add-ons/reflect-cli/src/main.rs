//! Reflect CLI: analyze one diary entry and print the reflection as JSON.
//!
//! Usage:
//!   reflect [--mood 😊] [--candidate "summary"]... [--remote] [TEXT]
//!   reflect --prompt [--current "question"]
//!
//! TEXT defaults to stdin. `--remote` asks OpenRouter for candidates (OPENROUTER_API_KEY);
//! `--candidate` supplies ready-made ones. The entry text itself is never logged.

use reflect_core::{
    prompts, CandidateSummary, OpenRouterCandidateSource, ReflectionAnalysisService, ScoringConfig,
};
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default)]
struct Args {
    mood: Option<String>,
    candidates: Vec<String>,
    remote: bool,
    prompt: bool,
    current: Option<String>,
    text: Vec<String>,
}

fn parse_args() -> Args {
    let mut parsed = Args::default();
    let mut args = std::env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--mood" => parsed.mood = args.next(),
            "--candidate" => parsed.candidates.extend(args.next()),
            "--remote" => parsed.remote = true,
            "--prompt" => parsed.prompt = true,
            "--current" => parsed.current = args.next(),
            _ => parsed.text.push(a),
        }
    }
    parsed
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[reflect] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = parse_args();

    if args.prompt {
        let question = prompts::prompt(&mut rand::thread_rng(), args.current.as_deref());
        println!("{question}");
        return Ok(());
    }

    let content = if args.text.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.text.join(" ")
    };

    let config = ScoringConfig::load()?;
    let mut service = ReflectionAnalysisService::new(config);
    let mood = args.mood.as_deref();

    let analysis = if args.remote {
        match OpenRouterCandidateSource::from_env() {
            Some(source) => {
                service = service.with_source(Arc::new(source));
                service.analyze_with_source(&content, mood).await
            }
            None => {
                tracing::warn!(target: "reflect::cli", "--remote given but OPENROUTER_API_KEY is not set; local only");
                service.analyze_local(&content, mood)
            }
        }
    } else {
        let candidates: Vec<CandidateSummary> = args
            .candidates
            .iter()
            .map(|s| CandidateSummary::new(s.as_str(), Vec::new()))
            .collect();
        service.analyze(&content, mood, &candidates)
    };

    tracing::info!(
        target: "reflect::cli",
        chars = content.chars().count(),
        tags = analysis.emotion_tags.len(),
        "reflection ready"
    );
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
