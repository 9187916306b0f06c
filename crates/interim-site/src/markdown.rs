//! The small markdown subset found in post bodies, rendered with regexes.

use std::sync::LazyLock;

use quick_xml::escape::escape;
use regex::Regex;

static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid paragraph regex"));
static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]+)\]\((https?://[^\s)]+)\)").expect("valid markdown link regex")
});
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"));
static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>)"]+"#).expect("valid bare url regex"));
/// Tail of the opening tag written for every anchor.
const ANCHOR_OPEN_END: &str = r#"target="_blank">"#;
static LINK_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link text regex"));

/// Renders a post body as HTML paragraphs.
///
/// The text is HTML-escaped first. Then `[text](url)` becomes an anchor,
/// `**bold**` becomes `<strong>`, and bare URLs outside existing anchors are
/// linked. Paragraphs are separated by blank lines in the input and joined
/// with `\n` in the output.
///
/// ```
/// use interim_site::markdown_to_html;
/// assert_eq!(markdown_to_html(""), "<p></p>");
/// assert_eq!(
///     markdown_to_html("**Achtung**: [hier](https://example.com)"),
///     r#"<p><strong>Achtung</strong>: <a href="https://example.com" target="_blank">hier</a></p>"#
/// );
/// ```
#[must_use]
pub fn markdown_to_html(text: &str) -> String {
    let escaped = escape(text.trim());
    let paragraphs: Vec<String> = PARAGRAPH_BREAK_RE
        .split(&escaped)
        .filter(|para| !para.trim().is_empty())
        .map(|para| {
            let para = MARKDOWN_LINK_RE.replace_all(para, r#"<a href="$2" target="_blank">$1</a>"#);
            let para = BOLD_RE.replace_all(&para, "<strong>$1</strong>");
            format!("<p>{}</p>", link_bare_urls(&para))
        })
        .collect();

    if paragraphs.is_empty() {
        return "<p></p>".to_owned();
    }
    paragraphs.join("\n")
}

/// Wraps bare URLs in anchors, skipping those already used as an `href`
/// value or as anchor text. A match ends before an escaped quote, so
/// `"https://example.com"` links only the URL itself.
fn link_bare_urls(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for m in BARE_URL_RE.find_iter(html) {
        let url = trim_at_escaped_quote(m.as_str());
        let before = &html[..m.start()];
        out.push_str(&html[last..m.start()]);
        if before.ends_with("href=\"") || before.ends_with(ANCHOR_OPEN_END) {
            out.push_str(url);
        } else {
            out.push_str(&format!(r#"<a href="{url}" target="_blank">{url}</a>"#));
        }
        last = m.start() + url.len();
    }
    out.push_str(&html[last..]);
    out
}

fn trim_at_escaped_quote(url: &str) -> &str {
    ["&quot;", "&apos;"]
        .iter()
        .filter_map(|entity| url.find(entity))
        .min()
        .map_or(url, |end| &url[..end])
}

/// Replaces `[text](url)` with `text`; bare URLs are kept.
#[must_use]
pub fn strip_markdown_links(text: &str) -> String {
    LINK_TEXT_RE.replace_all(text, "$1").into_owned()
}
