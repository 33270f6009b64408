use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{dates, ExtractError, Post};

/// Leaf element of interest the cursor is currently inside.
#[derive(PartialEq)]
enum Field {
    None,
    Title,
    Published,
    Updated,
}

/// Extracts posts from an Atom document.
///
/// Hand-rolled state machine over the streaming event reader: a flag marks
/// whether the cursor is inside an `<entry>`, scratch buffers collect the
/// entry's title, link, and date candidates, and the record is flushed (or
/// dropped) at `</entry>`.
///
/// Field rules: `title` contributes its character content; `link` contributes
/// its own `href` attribute, not its content, and the first non-empty `href`
/// inside the entry wins; `published` is the primary date candidate with
/// `updated` as fallback. Elements are matched by local name, so prefixed
/// forms like `<atom:entry>` extract the same way.
pub(super) fn extract(text: &str, language: &str) -> Result<Vec<Post>, ExtractError> {
    let mut reader = Reader::from_str(text);
    let mut buf = Vec::new();

    let mut posts = Vec::new();
    let mut in_entry = false;
    let mut field = Field::None;
    let mut acc = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut published = String::new();
    let mut updated = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"entry" if !in_entry => {
                    in_entry = true;
                    title.clear();
                    link.clear();
                    published.clear();
                    updated.clear();
                    field = Field::None;
                }
                b"title" if in_entry => {
                    field = Field::Title;
                    acc.clear();
                }
                b"published" if in_entry => {
                    field = Field::Published;
                    acc.clear();
                }
                b"updated" if in_entry => {
                    field = Field::Updated;
                    acc.clear();
                }
                b"link" if in_entry => {
                    capture_href(&e, &reader, &mut link)?;
                    field = Field::None;
                }
                _ => field = Field::None,
            },
            // Atom links are usually self-closing: <link href="..."/>
            Ok(Event::Empty(e)) => {
                if in_entry && e.local_name().as_ref() == b"link" {
                    capture_href(&e, &reader, &mut link)?;
                }
            }
            Ok(Event::Text(t)) => {
                if in_entry && field != Field::None {
                    acc.push_str(&t.unescape().map_err(ExtractError::xml)?);
                }
            }
            Ok(Event::CData(t)) => {
                if in_entry && field != Field::None {
                    acc.push_str(
                        &reader
                            .decoder()
                            .decode(t.as_ref())
                            .map_err(ExtractError::xml)?,
                    );
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"title" if in_entry && field == Field::Title => {
                    title = acc.trim().to_string();
                    field = Field::None;
                }
                b"published" if in_entry && field == Field::Published => {
                    published = acc.trim().to_string();
                    field = Field::None;
                }
                b"updated" if in_entry && field == Field::Updated => {
                    updated = acc.trim().to_string();
                    field = Field::None;
                }
                b"entry" if in_entry => {
                    in_entry = false;
                    if title.is_empty() || link.is_empty() {
                        tracing::debug!(title = %title, "Dropping Atom entry missing title or link");
                    } else {
                        let candidate = if !published.is_empty() {
                            Some(published.as_str())
                        } else if !updated.is_empty() {
                            Some(updated.as_str())
                        } else {
                            None
                        };
                        posts.push(Post {
                            title: title.clone(),
                            link: link.clone(),
                            language: language.to_string(),
                            published: candidate.and_then(dates::parse_date),
                        });
                    }
                }
                _ => field = Field::None,
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(posts)
}

/// Records the element's `href` attribute into `link` if none was seen yet.
fn capture_href(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    link: &mut String,
) -> Result<(), ExtractError> {
    if !link.is_empty() {
        return Ok(());
    }
    for attr_result in e.attributes() {
        let attr = match attr_result {
            Ok(attr) => attr,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping malformed attribute on <link>");
                continue;
            }
        };
        if attr.key.as_ref() == b"href" {
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(ExtractError::xml)?;
            let value = value.trim();
            if !value.is_empty() {
                *link = value.to_string();
            }
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example feed</title>
  <link href="https://example.com/"/>
  <entry>
    <title>First post</title>
    <link href="https://example.com/1"/>
    <published>2024-01-01T00:00:00Z</published>
    <updated>2024-01-02T00:00:00Z</updated>
  </entry>
  <entry>
    <title>Second post</title>
    <link href="https://example.com/2"/>
    <updated>2024-01-03T00:00:00Z</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_extracts_entries_with_href_links() {
        let posts = extract(FEED, "en").unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "First post");
        assert_eq!(posts[0].link, "https://example.com/1");
        assert_eq!(posts[0].language, "en");
    }

    #[test]
    fn test_published_wins_over_updated() {
        let posts = extract(FEED, "en").unwrap();
        // First entry has both: published (Jan 1) wins
        assert_eq!(posts[0].published, Some(1_704_067_200));
        // Second entry falls back to updated (Jan 3)
        assert_eq!(posts[1].published, Some(1_704_240_000));
    }

    #[test]
    fn test_feed_level_link_is_not_an_entry_link() {
        let doc = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="https://example.com/site"/>
  <entry><title>Only title</title></entry>
</feed>"#;
        // The entry has no link of its own, so it is dropped
        let posts = extract(doc, "en").unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_first_nonempty_href_wins() {
        let doc = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Multi-link</title>
    <link href="https://example.com/html"/>
    <link href="https://example.com/comments"/>
  </entry>
</feed>"#;
        let posts = extract(doc, "en").unwrap();
        assert_eq!(posts[0].link, "https://example.com/html");
    }

    #[test]
    fn test_link_content_is_ignored() {
        let doc = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Post</title>
    <link href="https://example.com/real">https://example.com/not-this</link>
  </entry>
</feed>"#;
        let posts = extract(doc, "en").unwrap();
        assert_eq!(posts[0].link, "https://example.com/real");
    }

    #[test]
    fn test_cdata_and_entities_in_title() {
        let doc = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title><![CDATA[Ampersands & angles]]></title>
    <link href="https://example.com/1"/>
  </entry>
  <entry>
    <title>Fish &amp; chips</title>
    <link href="https://example.com/2"/>
  </entry>
</feed>"#;
        let posts = extract(doc, "en").unwrap();
        assert_eq!(posts[0].title, "Ampersands & angles");
        assert_eq!(posts[1].title, "Fish & chips");
    }

    #[test]
    fn test_prefixed_elements_match_by_local_name() {
        let doc = r#"<atom:feed xmlns:atom="http://www.w3.org/2005/Atom">
  <atom:entry>
    <atom:title>Prefixed</atom:title>
    <atom:link href="https://example.com/p"/>
  </atom:entry>
</atom:feed>"#;
        let posts = extract(doc, "en").unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Prefixed");
    }

    #[test]
    fn test_blank_title_entry_dropped() {
        let doc = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>   </title>
    <link href="https://example.com/1"/>
  </entry>
</feed>"#;
        let posts = extract(doc, "en").unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        let doc = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry><title>Broken</wrong></entry>
</feed>"#;
        assert!(extract(doc, "en").is_err());
    }
}
