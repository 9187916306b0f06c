//! Syndication feed (RSS 2.0 / Atom) parsing for the feed fetch mode.
//!
//! Reddit serves subreddit feeds as Atom; plain RSS 2.0 `<item>`s are
//! accepted too. Feeds carry no vote data, so posts built from them have a
//! score of zero and an upvote ratio of `0.0`.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::DateTime;
use interim_core::RawPost;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use crate::error::ScraperError;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#)
        .expect("valid anchor regex")
});
static BLOCK_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</p>|<br\s*/?>|</li>|</h[1-6]>|</blockquote>|</pre>")
        .expect("valid block break regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static EXCESS_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

const SELFTEXT_START: &str = "<!-- SC_OFF -->";
const SELFTEXT_END: &str = "<!-- SC_ON -->";

/// One `<entry>`/`<item>` with its raw string fields.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct FeedEntry {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) link: String,
    /// HTML content (`content`, `description`, or `content:encoded`).
    pub(crate) content: String,
    pub(crate) summary: String,
    pub(crate) published: String,
    pub(crate) updated: String,
    pub(crate) author: String,
    /// RSS `<category>` text. Atom categories name the subreddit and are ignored.
    pub(crate) category: Option<String>,
}

impl FeedEntry {
    fn apply_text(&mut self, path: &[String], text: &str) {
        let Some(tag) = path.last() else {
            return;
        };
        let parent = path.len().checked_sub(2).map(|i| path[i].as_str());
        match (parent, tag.as_str()) {
            (Some("author"), "name") => self.author = text.trim().to_owned(),
            (None, "title") => self.title.push_str(text),
            (None, "link") => self.link = text.trim().to_owned(),
            (None, "id" | "guid") => self.id = text.trim().to_owned(),
            (None, "content" | "description" | "encoded") => self.content.push_str(text),
            (None, "summary") => self.summary.push_str(text),
            (None, "published" | "pubDate") => self.published = text.trim().to_owned(),
            (None, "updated") => self.updated = text.trim().to_owned(),
            (None, "author" | "creator") => self.author = text.trim().to_owned(),
            (None, "category") => self.category = Some(text.trim().to_owned()),
            _ => {}
        }
    }
}

fn local_name(raw: &[u8]) -> String {
    std::str::from_utf8(raw).unwrap_or("").to_owned()
}

/// Parses a feed document into its entries.
///
/// # Errors
///
/// Returns [`ScraperError::Xml`] if the document is not well-formed.
pub(crate) fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, ScraperError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    // Element names below the current entry.
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(e.local_name().as_ref());
                if name == "entry" || name == "item" {
                    current = Some(FeedEntry::default());
                    path.clear();
                } else if let Some(entry) = current.as_mut() {
                    if name == "link" && path.is_empty() {
                        if let Some(href) = alternate_href(&e) {
                            entry.link = href;
                        }
                    }
                    path.push(name);
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(entry) = current.as_mut() {
                    let name = local_name(e.local_name().as_ref());
                    if name == "link" && path.is_empty() && entry.link.is_empty() {
                        if let Some(href) = alternate_href(&e) {
                            entry.link = href;
                        }
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = local_name(e.local_name().as_ref());
                if (name == "entry" || name == "item") && path.is_empty() {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                } else if current.is_some() {
                    path.pop();
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(entry) = current.as_mut() {
                    let text = e.unescape()?;
                    entry.apply_text(&path, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(entry) = current.as_mut() {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    entry.apply_text(&path, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ScraperError::Xml(e)),
            _ => {}
        }
    }

    Ok(entries)
}

/// `href` of an Atom `<link>` unless it points somewhere other than the
/// entry itself (`rel="enclosure"`, `rel="related"`, ...).
fn alternate_href(e: &quick_xml::events::BytesStart<'_>) -> Option<String> {
    let mut href = None;
    let mut rel_ok = true;
    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"href" => href = attr.unescape_value().ok().map(Cow::into_owned),
            b"rel" => {
                rel_ok = attr
                    .unescape_value()
                    .map(|rel| rel == "alternate")
                    .unwrap_or(false);
            }
            _ => {}
        }
    }
    href.filter(|_| rel_ok)
}

/// Converts a feed entry into a [`RawPost`].
///
/// # Errors
///
/// Returns [`ScraperError::InvalidPost`] when the entry has neither an id
/// nor a permalink to derive one from, or no parseable timestamp.
pub(crate) fn entry_to_raw_post(
    entry: FeedEntry,
    source_base_url: &str,
) -> Result<RawPost, ScraperError> {
    let permalink = relative_permalink(&entry.link, source_base_url);

    let id = entry
        .id
        .strip_prefix("t3_")
        .unwrap_or(&entry.id)
        .to_owned();
    let id = if id.is_empty() || id.contains("://") {
        id_from_permalink(&permalink).unwrap_or_default()
    } else {
        id
    };
    if id.is_empty() {
        return Err(ScraperError::InvalidPost {
            id: "<unknown>".to_owned(),
            reason: format!("no id or permalink in entry \"{}\"", entry.title.trim()),
        });
    }

    let stamp = if entry.published.is_empty() {
        &entry.updated
    } else {
        &entry.published
    };
    let created_utc = parse_timestamp(stamp).ok_or_else(|| ScraperError::InvalidPost {
        id: id.clone(),
        reason: format!("unparseable timestamp \"{stamp}\""),
    })?;

    let html = if entry.content.is_empty() {
        &entry.summary
    } else {
        &entry.content
    };

    let author = entry
        .author
        .strip_prefix("/u/")
        .unwrap_or(&entry.author)
        .to_owned();

    Ok(RawPost {
        id,
        title: entry.title.trim().to_owned(),
        body: html_to_markdown(html),
        score: 0,
        num_comments: 0,
        created_utc,
        permalink,
        url: entry.link,
        flair: entry.category.filter(|c| !c.is_empty()),
        upvote_ratio: 0.0,
        author,
    })
}

/// RFC 3339 (Atom) or RFC 2822 (RSS) timestamp as fractional epoch seconds.
#[allow(clippy::cast_precision_loss)]
fn parse_timestamp(raw: &str) -> Option<f64> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()?;
    Some(parsed.timestamp_millis() as f64 / 1000.0)
}

/// Path of `link` relative to the source, e.g. `/r/x/comments/abc/t/`.
fn relative_permalink(link: &str, source_base_url: &str) -> String {
    let base = source_base_url.trim_end_matches('/');
    if let Some(rest) = link.strip_prefix(base) {
        return rest.to_owned();
    }
    match link.split_once("://") {
        Some((_, after_scheme)) => after_scheme
            .find('/')
            .map_or_else(String::new, |idx| after_scheme[idx..].to_owned()),
        None => link.to_owned(),
    }
}

/// `abc` from `/r/x/comments/abc/title/`.
fn id_from_permalink(permalink: &str) -> Option<String> {
    let mut segments = permalink.split('/').skip_while(|s| *s != "comments");
    segments.next()?;
    segments
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Reduces feed HTML to the markdown-like text the rest of the system
/// expects: anchors become `[text](href)`, block ends become paragraph
/// breaks, remaining tags are dropped, entities are decoded.
pub(crate) fn html_to_markdown(html: &str) -> String {
    let html = match (html.find(SELFTEXT_START), html.find(SELFTEXT_END)) {
        (Some(start), Some(end)) if start < end => &html[start + SELFTEXT_START.len()..end],
        _ => html.split("submitted by").next().unwrap_or(html),
    };

    let with_links = ANCHOR_RE.replace_all(html, |caps: &regex::Captures<'_>| {
        let href = &caps[1];
        let text = TAG_RE.replace_all(&caps[2], "");
        let text = text.trim();
        if text.is_empty() {
            href.to_owned()
        } else {
            format!("[{text}]({href})")
        }
    });
    let with_breaks = BLOCK_BREAK_RE.replace_all(&with_links, "\n\n");
    let stripped = TAG_RE.replace_all(&with_breaks, "");
    let decoded = quick_xml::escape::unescape(&stripped)
        .map_or_else(|_| stripped.to_string(), Cow::into_owned);

    let lines: Vec<&str> = decoded.lines().map(str::trim).collect();
    EXCESS_NEWLINES_RE
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_owned()
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
