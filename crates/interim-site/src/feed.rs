//! RSS 2.0 feed output.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use interim_core::Post;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::archive::post_datetime;
use crate::error::SiteError;
use crate::html::{SITE_DESCRIPTION, SITE_TITLE};
use crate::markdown::strip_markdown_links;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const TITLE_FALLBACK_CHARS: usize = 80;

/// RFC 2822 date as used by RSS, always in GMT.
fn rss_date(dt: DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Item title: the post title, or the start of the body when untitled.
fn item_title(post: &Post) -> String {
    let title = post.title.trim();
    if !title.is_empty() {
        return title.to_owned();
    }
    let body = post.body.as_str();
    if body.chars().count() > TITLE_FALLBACK_CHARS {
        let head: String = body.chars().take(TITLE_FALLBACK_CHARS).collect();
        format!("{}...", head.trim())
    } else {
        body.trim().to_owned()
    }
}

struct FeedWriter {
    writer: Writer<Vec<u8>>,
}

impl FeedWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), SiteError> {
        self.writer
            .write_event(event)
            .map_err(|e| SiteError::Xml(e.to_string()))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), SiteError> {
        self.event(Event::Start(BytesStart::new(name)))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// Serializes `posts` as an RSS 2.0 document.
///
/// # Errors
///
/// Returns [`SiteError::Xml`] if the writer fails.
pub fn feed_xml(posts: &[Post], site_url: &str) -> Result<String, SiteError> {
    let site_url = site_url.trim_end_matches('/');
    let mut w = FeedWriter::new();

    w.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    w.event(Event::Start(
        BytesStart::new("rss").with_attributes([("version", "2.0"), ("xmlns:atom", ATOM_NS)]),
    ))?;
    w.event(Event::Start(BytesStart::new("channel")))?;

    w.text_element("title", SITE_TITLE)?;
    w.text_element("link", site_url)?;
    w.text_element("description", SITE_DESCRIPTION)?;
    w.text_element("language", "de-de")?;

    let newest = posts
        .iter()
        .map(|p| p.created_utc)
        .max_by(f64::total_cmp)
        .and_then(post_datetime)
        .unwrap_or_else(Utc::now);
    w.text_element("lastBuildDate", &rss_date(newest))?;

    let self_href = format!("{site_url}/feed.xml");
    w.event(Event::Empty(BytesStart::new("atom:link").with_attributes([
        ("href", self_href.as_str()),
        ("rel", "self"),
        ("type", "application/rss+xml"),
    ])))?;

    for post in posts {
        w.event(Event::Start(BytesStart::new("item")))?;
        w.text_element("title", &item_title(post))?;
        w.text_element("link", &post.reddit_url)?;
        w.text_element("description", &strip_markdown_links(&post.body))?;
        let published = post_datetime(post.created_utc).unwrap_or_default();
        w.text_element("pubDate", &rss_date(published))?;

        w.event(Event::Start(
            BytesStart::new("guid").with_attributes([("isPermaLink", "true")]),
        ))?;
        w.event(Event::Text(BytesText::new(&post.reddit_url)))?;
        w.event(Event::End(BytesEnd::new("guid")))?;

        if let Some(flair) = post.flair.as_deref().filter(|f| !f.is_empty()) {
            w.text_element("category", flair)?;
        }
        w.event(Event::End(BytesEnd::new("item")))?;
    }

    w.event(Event::End(BytesEnd::new("channel")))?;
    w.event(Event::End(BytesEnd::new("rss")))?;

    String::from_utf8(w.into_bytes()).map_err(|e| SiteError::Xml(e.to_string()))
}

/// Writes `feed.xml` into `output_dir` and returns its path.
///
/// # Errors
///
/// Returns [`SiteError::Io`] if the file cannot be written and
/// [`SiteError::Xml`] if serialization fails.
pub fn generate_feed(
    posts: &[Post],
    output_dir: &Path,
    site_url: &str,
) -> Result<PathBuf, SiteError> {
    let xml = feed_xml(posts, site_url)?;
    fs::create_dir_all(output_dir).map_err(SiteError::io(output_dir))?;
    let path = output_dir.join("feed.xml");
    fs::write(&path, xml).map_err(SiteError::io(&path))?;
    tracing::info!(path = %path.display(), items = posts.len(), "wrote feed");
    Ok(path)
}
