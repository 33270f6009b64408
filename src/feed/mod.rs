//! Feed ingestion: the concurrent fetch-and-parse pipeline.
//!
//! This module turns a list of configured sources into one merged collection
//! of posts:
//!
//! - **Fetching**: one HTTP GET per source with connect/read timeouts
//! - **Classification**: cheap substring sniff deciding Atom vs. RSS
//! - **Extraction**: two hand-rolled state machines over a streaming XML
//!   event reader, one per dialect
//! - **Date normalization**: heterogeneous timestamp strings to epoch seconds
//! - **Orchestration**: one task per source, launched together, joined, merged
//!
//! Every failure is isolated to the source that caused it. A bad URL, a dead
//! server, or malformed XML costs that source's posts and adds a line to the
//! diagnostic log; it never fails the pipeline. See [`run`].

mod atom;
mod classify;
mod dates;
mod fetcher;
mod pipeline;
mod rss;

pub use classify::{classify, FeedKind};
pub use dates::parse_date;
pub use fetcher::{build_client, fetch_text, FetchError, DEFAULT_TIMEOUT};
pub use pipeline::{process_source, run, PipelineOutput, SourceResult};

use serde::Deserialize;

/// One configured feed to fetch.
///
/// Sources are supplied wholesale by the caller (typically the TOML loader in
/// [`crate::config`]) and are never mutated by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    /// Short language tag stamped onto every post from this source, e.g. "en".
    #[serde(default = "default_language")]
    pub language: String,
    /// Human-readable label, used in diagnostic log lines.
    pub title: String,
    /// Fetch target.
    pub url: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// One normalized article extracted from a feed.
///
/// Extractors only emit a `Post` when both `title` and `link` are non-empty
/// after trimming; records missing either are dropped at the extractor
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
    /// Copied from the originating [`Source`]. Plain-writable so callers may
    /// override it after construction.
    pub language: String,
    /// Publication time as epoch seconds, `None` when the entry carried no
    /// parseable date.
    pub published: Option<i64>,
}

/// Errors from the streaming extractors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The underlying event reader could not tokenize the markup.
    #[error("XML parse error: {0}")]
    Xml(String),
}

impl ExtractError {
    /// Stringifies any reader-layer error into the XML variant.
    fn xml(err: impl std::fmt::Display) -> Self {
        ExtractError::Xml(err.to_string())
    }
}

/// Sorts posts newest-first; posts without a date sort strictly last.
///
/// The sort is stable, so posts with equal timestamps (and the undated tail)
/// keep their relative order from aggregation.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| match (a.published, b.published) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
