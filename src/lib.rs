//! newsriver: concurrent RSS/Atom feed aggregation.
//!
//! Fetches a configured list of feed sources in parallel, detects each
//! document's dialect (Atom or RSS), extracts posts with hand-rolled
//! streaming XML state machines, normalizes publication dates to epoch
//! seconds, and merges everything into one collection plus a diagnostic log.
//! Failures never cross source boundaries: a dead server or broken document
//! costs that source's posts and one log line, nothing more.
//!
//! The core contract is sources-in / (posts, log)-out — see [`feed::run`].
//! [`config`] supplies the TOML-backed source list used by the CLI binary.

pub mod config;
pub mod feed;

pub use feed::{Post, Source};
