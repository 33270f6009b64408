use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use newsriver::config::Config;
use newsriver::feed::{self, build_client, sort_newest_first};

#[derive(Parser, Debug)]
#[command(
    name = "newsriver",
    about = "Merge RSS/Atom feeds into one chronological river of posts"
)]
struct Args {
    /// Path to the feeds file
    #[arg(long, value_name = "FILE", default_value = "feeds.toml")]
    feeds: PathBuf,

    /// Connect/read timeout per feed request, in milliseconds
    #[arg(long, default_value_t = 15_000)]
    timeout_ms: u64,

    /// Print at most this many posts (0 = all)
    #[arg(long, default_value_t = 0)]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = Config::load(&args.feeds)
        .with_context(|| format!("Failed to load feeds from {}", args.feeds.display()))?;

    let timeout = Duration::from_millis(args.timeout_ms);
    let client = build_client(timeout, timeout).context("Failed to build HTTP client")?;

    let mut output = feed::run(&client, &config.feeds, timeout).await;
    sort_newest_first(&mut output.posts);

    let shown = if args.limit == 0 {
        output.posts.len()
    } else {
        args.limit.min(output.posts.len())
    };
    for post in &output.posts[..shown] {
        println!("{}", format_post(post));
    }

    // Posts go to stdout, diagnostics to stderr, so the list stays pipeable
    eprintln!("{}", output.log);
    Ok(())
}

fn format_post(post: &newsriver::Post) -> String {
    match post.published.and_then(|epoch| Utc.timestamp_opt(epoch, 0).single()) {
        Some(when) => format!(
            "[{}] {} - {} ({})",
            post.language,
            post.title,
            post.link,
            when.to_rfc3339()
        ),
        None => format!("[{}] {} - {}", post.language, post.title, post.link),
    }
}
