use std::time::Duration;

use futures::future::join_all;

use super::{atom, classify, fetch_text, rss, FeedKind, Post, Source};

/// Result of processing one source: the posts it yielded and its diagnostic
/// log fragment. A task never fails past this boundary — every error mode is
/// converted to an empty post list plus a descriptive log line.
#[derive(Debug)]
pub struct SourceResult {
    pub posts: Vec<Post>,
    pub log: Vec<String>,
}

impl SourceResult {
    fn failed(source: &Source, stage: &str, reason: &str) -> Self {
        SourceResult {
            posts: Vec::new(),
            log: vec![format!(
                "Error: Feed '{}' ({}): {} FAILED: {}",
                source.title, source.url, stage, reason
            )],
        }
    }
}

/// The orchestrator's aggregate: all posts across sources (cross-source order
/// unspecified) and the newline-joined diagnostic log, summary line first.
#[derive(Debug)]
pub struct PipelineOutput {
    pub posts: Vec<Post>,
    pub log: String,
}

/// Runs Fetcher → Classifier → Extractor for one source.
///
/// Failure handling, all isolated to this source:
///
/// - fetch failure → `Fetch FAILED` log line, no posts, no parse attempt
/// - blank body, unrecognized format, or tokenizer error → `Parse FAILED`
/// - successful parse with zero valid records → `Parsed 0 items.`
/// - one or more posts → the posts, no diagnostic line
pub async fn process_source(
    client: &reqwest::Client,
    source: &Source,
    timeout: Duration,
) -> SourceResult {
    let text = match fetch_text(client, &source.url, timeout).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(feed = %source.url, error = %err, "Fetch failed");
            return SourceResult::failed(source, "Fetch", &err.to_string());
        }
    };

    let posts = match parse_document(&text, &source.language) {
        Ok(posts) => posts,
        Err(reason) => {
            tracing::warn!(feed = %source.url, error = %reason, "Parse failed");
            return SourceResult::failed(source, "Parse", &reason);
        }
    };

    tracing::debug!(feed = %source.url, posts = posts.len(), "Source processed");

    let mut log = Vec::new();
    if posts.is_empty() {
        log.push(format!(
            "Error: Feed '{}' ({}): Parsed 0 items.",
            source.title, source.url
        ));
    }
    SourceResult { posts, log }
}

/// Classifies the fetched text and runs the matching extractor.
///
/// Blank content and an unrecognized format are parse failures, same as a
/// tokenizer error (the classifier itself never fails).
fn parse_document(text: &str, language: &str) -> Result<Vec<Post>, String> {
    if text.trim().is_empty() {
        return Err("empty response body".to_string());
    }
    let kind = classify(text).ok_or_else(|| "unrecognized feed format".to_string())?;
    match kind {
        FeedKind::Atom => atom::extract(text, language),
        FeedKind::Rss => rss::extract(text, language),
    }
    .map_err(|e| e.to_string())
}

/// Fans out one task per source, joins them all, and merges the results.
///
/// Every task is launched together and the full set is awaited — no partial
/// results, no early return. Posts are concatenated across tasks; log
/// fragments are appended in launch order (join order preserves input order),
/// prefixed with a summary line. An empty source list spawns no tasks and
/// yields a single "no feeds" log line.
pub async fn run(
    client: &reqwest::Client,
    sources: &[Source],
    timeout: Duration,
) -> PipelineOutput {
    if sources.is_empty() {
        return PipelineOutput {
            posts: Vec::new(),
            log: "No feeds provided; nothing to fetch.".to_string(),
        };
    }

    let results = join_all(
        sources
            .iter()
            .map(|source| process_source(client, source, timeout)),
    )
    .await;

    let mut posts = Vec::new();
    let mut lines = Vec::new();
    for result in results {
        posts.extend(result.posts);
        lines.extend(result.log);
    }

    let mut log = format!(
        "All feed processing finished. Total posts retrieved: {}",
        posts.len()
    );
    for line in &lines {
        log.push('\n');
        log.push_str(line);
    }

    tracing::info!(sources = sources.len(), posts = posts.len(), "Pipeline finished");

    PipelineOutput { posts, log }
}
