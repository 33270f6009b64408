//! Source list loader for the feeds TOML file.
//!
//! The file holds one `[[feeds]]` table per source:
//!
//! ```toml
//! [[feeds]]
//! language = "en"
//! title = "Example"
//! url = "https://example.com/feed.xml"
//! ```
//!
//! `language` is optional and defaults to `"en"`. Entries whose URL does not
//! parse or uses a non-HTTP scheme are skipped with a warning rather than
//! failing the whole load; the pipeline itself performs no further
//! validation.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use url::Url;

use crate::feed::Source;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read feeds file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in feeds file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The parsed feeds file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feeds: Vec<Source>,
}

impl Config {
    /// Loads and validates the feeds file.
    ///
    /// - Unreadable file → `ConfigError::Io`
    /// - Invalid TOML → `ConfigError::Parse` with line number info
    /// - Empty file → empty feed list
    /// - Entries with invalid URLs → skipped, logged at warn
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Feeds file is empty");
            return Ok(Self::default());
        }

        let mut config: Config = toml::from_str(&content)?;
        let declared = config.feeds.len();
        config
            .feeds
            .retain(|feed| match validate_feed_url(&feed.url) {
                Ok(()) => true,
                Err(reason) => {
                    tracing::warn!(
                        url = %feed.url,
                        title = %feed.title,
                        reason = %reason,
                        "Skipping feed with invalid URL"
                    );
                    false
                }
            });

        tracing::info!(
            path = %path.display(),
            feeds = config.feeds.len(),
            skipped = declared - config.feeds.len(),
            "Loaded feed list"
        );
        Ok(config)
    }
}

fn validate_feed_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("unsupported scheme '{scheme}' (only http/https)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("newsriver_config_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("feeds.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/tmp/newsriver_nonexistent/feeds.toml");
        assert!(matches!(Config::load(path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_empty_file_yields_empty_list() {
        let path = write_temp("empty", "   \n");
        let config = Config::load(&path).unwrap();
        assert!(config.feeds.is_empty());
    }

    #[test]
    fn test_full_entry() {
        let path = write_temp(
            "full",
            r#"
[[feeds]]
language = "cs"
title = "Example"
url = "https://example.com/feed.xml"
"#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.feeds.len(), 1);
        assert_eq!(config.feeds[0].language, "cs");
        assert_eq!(config.feeds[0].title, "Example");
        assert_eq!(config.feeds[0].url, "https://example.com/feed.xml");
    }

    #[test]
    fn test_language_defaults_to_en() {
        let path = write_temp(
            "default_lang",
            r#"
[[feeds]]
title = "No language"
url = "https://example.com/feed"
"#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.feeds[0].language, "en");
    }

    #[test]
    fn test_invalid_urls_skipped_not_fatal() {
        let path = write_temp(
            "bad_urls",
            r#"
[[feeds]]
title = "Good"
url = "https://example.com/feed"

[[feeds]]
title = "Not a URL"
url = "definitely not a url"

[[feeds]]
title = "Wrong scheme"
url = "ftp://example.com/feed"
"#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.feeds.len(), 1);
        assert_eq!(config.feeds[0].title, "Good");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let path = write_temp("invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_entry_missing_url_is_parse_error() {
        let path = write_temp(
            "missing_url",
            r#"
[[feeds]]
title = "No URL here"
"#,
        );
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
