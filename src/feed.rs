//! Feed fetching and RSS/Atom parsing.
//!
//! Parsing is a single pass over `quick-xml` pull events. Both RSS 2.0
//! `<item>` and Atom `<entry>` elements become [`Article`]s, in document
//! order:
//!
//! | Article field | RSS 2.0 | Atom |
//! |---------------|---------|------|
//! | `title` | `<title>` | `<title>` |
//! | `link` | `<link>` text | `<link href>` (rel absent or `alternate`) |
//! | `summary` | `<description>` | `<summary>`, else `<content>` |
//! | `published_at` | `<pubDate>` (RFC 2822), `<dc:date>` | `<published>`, else `<updated>` (RFC 3339) |

use crate::error::NewsError;
use crate::models::Article;
use crate::transport::Transport;
use crate::utils::truncate_for_log;
use chrono::{DateTime, Utc};
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::{debug, info, instrument, warn};
use url::Url;

const UNTITLED: &str = "(untitled)";

/// Fetch `url` and parse it into articles.
///
/// Any failure here is fatal for the session: there is nothing to list.
#[instrument(level = "info", skip(transport))]
pub async fn fetch<T: Transport>(transport: &T, url: &str) -> Result<Vec<Article>, NewsError> {
    let xml = transport.get_text(url).await?;
    let base = Url::parse(url).ok();
    let articles = parse_feed(&xml, base.as_ref()).inspect_err(|e| {
        warn!(error = %e, body = %truncate_for_log(&xml, 200), "Feed did not parse");
    })?;
    info!(count = articles.len(), "Parsed feed");
    Ok(articles)
}

/// Parse an RSS 2.0 or Atom document.
///
/// Relative article links are resolved against `base` when given. Entries
/// without any link are dropped since there would be nothing to open.
pub fn parse_feed(xml: &str, base: Option<&Url>) -> Result<Vec<Article>, NewsError> {
    let mut reader = Reader::from_str(xml);

    let mut articles = Vec::new();
    let mut current: Option<EntryBuilder> = None;
    // Field being collected and the depth its element opened at.
    let mut field: Option<(Field, usize)> = None;
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = local_name(&e);
                if is_entry(&name) {
                    current = Some(EntryBuilder::default());
                } else if let Some(entry) = current.as_mut() {
                    // an href-style link carries no text worth collecting
                    let atom_link = field.is_none() && name == "link" && entry.take_atom_link(&e);
                    if field.is_none() && !atom_link {
                        if let Some(f) = Field::from_name(&name) {
                            field = Some((f, depth));
                            text.clear();
                        }
                    }
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if let Some(entry) = current.as_mut() {
                    if field.is_none() && local_name(&e) == "link" {
                        entry.take_atom_link(&e);
                    }
                }
            }
            Event::Text(e) => {
                if field.is_some() {
                    let raw = String::from_utf8_lossy(&e);
                    match unescape(&raw) {
                        Ok(s) => text.push_str(&s),
                        Err(_) => text.push_str(&raw),
                    }
                }
            }
            Event::CData(e) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                if field.is_some() {
                    let name = String::from_utf8_lossy(&e);
                    match resolve_entity(&name) {
                        Some(s) => text.push_str(&s),
                        None => {
                            text.push('&');
                            text.push_str(&name);
                            text.push(';');
                        }
                    }
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if let Some((f, opened_at)) = field {
                    if depth == opened_at {
                        if let Some(entry) = current.as_mut() {
                            entry.set(f, text.trim());
                        }
                        field = None;
                        text.clear();
                    }
                } else if is_entry(&String::from_utf8_lossy(e.local_name().as_ref())) {
                    if let Some(entry) = current.take() {
                        match entry.build(base) {
                            Some(article) => articles.push(article),
                            None => debug!("Skipping feed entry without a link"),
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(articles)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn is_entry(name: &str) -> bool {
    name == "item" || name == "entry"
}

/// Resolve `&name;` where `name` is a predefined XML entity or a character
/// reference such as `#8217` / `#x2019`.
fn resolve_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}

/// RSS dates are RFC 2822, Atom and Dublin Core dates RFC 3339.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Summary,
    Content,
    Published,
    /// Only used when no publication date is given.
    Updated,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Field::Title),
            "link" => Some(Field::Link),
            "description" | "summary" => Some(Field::Summary),
            "content" => Some(Field::Content),
            "pubDate" | "published" | "date" => Some(Field::Published),
            "updated" => Some(Field::Updated),
            _ => None,
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    title: Option<String>,
    link: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    published_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl EntryBuilder {
    /// First non-empty value wins for every field.
    fn set(&mut self, field: Field, value: &str) {
        if value.is_empty() {
            return;
        }
        match field {
            Field::Title => set_once(&mut self.title, value),
            Field::Link => set_once(&mut self.link, value),
            Field::Summary => set_once(&mut self.summary, value),
            Field::Content => set_once(&mut self.content, value),
            Field::Published => {
                if self.published_at.is_none() {
                    self.published_at = parse_date(value);
                }
            }
            Field::Updated => {
                if self.updated_at.is_none() {
                    self.updated_at = parse_date(value);
                }
            }
        }
    }

    /// Handle an Atom `<link href=".." rel=".."/>`. Returns false when the
    /// element carries no `href` and should be read as an RSS text link.
    fn take_atom_link(&mut self, e: &BytesStart<'_>) -> bool {
        let mut href = None;
        let mut rel = None;
        for attr in e.attributes().flatten() {
            let value = String::from_utf8_lossy(&attr.value).into_owned();
            match attr.key.local_name().as_ref() {
                b"href" => href = Some(value),
                b"rel" => rel = Some(value),
                _ => {}
            }
        }
        let Some(href) = href else {
            return false;
        };
        if rel.as_deref().is_none_or(|r| r == "alternate") {
            let href = unescape(&href).map(|s| s.into_owned()).unwrap_or(href);
            set_once(&mut self.link, href.trim());
        }
        true
    }

    fn build(self, base: Option<&Url>) -> Option<Article> {
        let link = self.link?;
        let link = match base.map(|b| b.join(&link)) {
            Some(Ok(resolved)) => resolved.to_string(),
            _ => link,
        };
        Some(Article {
            title: self.title.unwrap_or_else(|| UNTITLED.to_string()),
            link,
            summary: self.summary.or(self.content).unwrap_or_default(),
            published_at: self.published_at.or(self.updated_at),
        })
    }
}

fn set_once(slot: &mut Option<String>, value: &str) {
    if slot.is_none() && !value.is_empty() {
        *slot = Some(value.to_string());
    }
}
