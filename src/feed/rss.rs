use quick_xml::events::Event;
use quick_xml::Reader;

use super::{dates, ExtractError, Post};

/// Leaf element of interest the cursor is currently inside.
#[derive(PartialEq)]
enum Field {
    None,
    Title,
    Link,
    PubDate,
    DcDate,
}

/// Extracts posts from an RSS document.
///
/// Same state-machine shape as the Atom extractor, adapted to the
/// `<channel>`/`<item>` grammar: `title` and `link` contribute their
/// character content, `pubDate` is the date candidate with a namespaced
/// `date` element (e.g. `dc:date`, matched by local name) as the alternate.
/// `pubDate` wins over the alternate regardless of document order.
pub(super) fn extract(text: &str, language: &str) -> Result<Vec<Post>, ExtractError> {
    let mut reader = Reader::from_str(text);
    let mut buf = Vec::new();

    let mut posts = Vec::new();
    let mut in_item = false;
    let mut field = Field::None;
    let mut acc = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut pub_date = String::new();
    let mut dc_date = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"item" if !in_item => {
                    in_item = true;
                    title.clear();
                    link.clear();
                    pub_date.clear();
                    dc_date.clear();
                    field = Field::None;
                }
                b"title" if in_item => {
                    field = Field::Title;
                    acc.clear();
                }
                b"link" if in_item => {
                    field = Field::Link;
                    acc.clear();
                }
                b"pubDate" if in_item => {
                    field = Field::PubDate;
                    acc.clear();
                }
                b"date" if in_item => {
                    field = Field::DcDate;
                    acc.clear();
                }
                _ => field = Field::None,
            },
            Ok(Event::Text(t)) => {
                if in_item && field != Field::None {
                    acc.push_str(&t.unescape().map_err(ExtractError::xml)?);
                }
            }
            Ok(Event::CData(t)) => {
                if in_item && field != Field::None {
                    acc.push_str(
                        &reader
                            .decoder()
                            .decode(t.as_ref())
                            .map_err(ExtractError::xml)?,
                    );
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"title" if in_item && field == Field::Title => {
                    title = acc.trim().to_string();
                    field = Field::None;
                }
                b"link" if in_item && field == Field::Link => {
                    link = acc.trim().to_string();
                    field = Field::None;
                }
                b"pubDate" if in_item && field == Field::PubDate => {
                    pub_date = acc.trim().to_string();
                    field = Field::None;
                }
                b"date" if in_item && field == Field::DcDate => {
                    dc_date = acc.trim().to_string();
                    field = Field::None;
                }
                b"item" if in_item => {
                    in_item = false;
                    if title.is_empty() || link.is_empty() {
                        tracing::debug!(title = %title, "Dropping RSS item missing title or link");
                    } else {
                        let candidate = if !pub_date.is_empty() {
                            Some(pub_date.as_str())
                        } else if !dc_date.is_empty() {
                            Some(dc_date.as_str())
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
