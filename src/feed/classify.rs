/// The two syndication dialects the extractors understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    /// Atom: `<feed>` documents containing `<entry>` records.
    Atom,
    /// RSS: `<rss>`/`<channel>` documents containing `<item>` records.
    Rss,
}

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/atom";
const RSS_LEGACY_NAMESPACE: &str = "purl.org/rss";

/// Decides which dialect a fetched document is written in.
///
/// This is a cheap, case-insensitive substring sniff, not a validating parse:
/// a document is Atom if it opens a `<feed` tag AND names the Atom namespace,
/// RSS if it opens `<rss` or names the legacy RSS namespace. Anything else is
/// `None`, which the per-source task reports as a parse failure.
///
/// The order matters: the Atom check runs first, so an `<rss` document that
/// loosely contains the word "feed" somewhere still classifies as RSS.
pub fn classify(text: &str) -> Option<FeedKind> {
    let lower = text.to_lowercase();
    if lower.contains("<feed") && lower.contains(ATOM_NAMESPACE) {
        Some(FeedKind::Atom)
    } else if lower.contains("<rss") || lower.contains(RSS_LEGACY_NAMESPACE) {
        Some(FeedKind::Rss)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_requires_feed_tag_and_namespace() {
        let doc = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry/></feed>"#;
        assert_eq!(classify(doc), Some(FeedKind::Atom));
        // <feed without the namespace is not enough
        assert_eq!(classify("<feed><entry/></feed>"), None);
    }

    #[test]
    fn test_rss_by_opening_tag() {
        let doc = r#"<rss version="2.0"><channel/></rss>"#;
        assert_eq!(classify(doc), Some(FeedKind::Rss));
    }

    #[test]
    fn test_rss_by_legacy_namespace() {
        let doc = r#"<rdf:RDF xmlns="http://purl.org/rss/1.0/"><item/></rdf:RDF>"#;
        assert_eq!(classify(doc), Some(FeedKind::Rss));
    }

    #[test]
    fn test_rss_wins_over_loose_feed_substring() {
        // Contains the word "feed" but no Atom namespace: still RSS
        let doc = r#"<rss version="2.0"><channel><title>My feed</title></channel></rss>"#;
        assert_eq!(classify(doc), Some(FeedKind::Rss));
    }

    #[test]
    fn test_case_insensitive() {
        let doc = r#"<RSS version="2.0"><channel/></RSS>"#;
        assert_eq!(classify(doc), Some(FeedKind::Rss));
        let atom = r#"<FEED xmlns="HTTP://WWW.W3.ORG/2005/ATOM"/>"#;
        assert_eq!(classify(atom), Some(FeedKind::Atom));
    }

    #[test]
    fn test_neither_dialect() {
        assert_eq!(classify("<html><body>hello</body></html>"), None);
        assert_eq!(classify(""), None);
    }
}
