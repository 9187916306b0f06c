//! Derived-field helpers for [`crate::Post`].
//!
//! These are pure functions over immutable inputs; `Post` calls them once at
//! construction and stores the results.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// `[text](url)`, capturing the http(s) target.
static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]*\]\((https?://[^)]+)\)").expect("valid markdown link regex")
});

/// Bare URL left over once markdown links are removed.
static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)>]+").expect("valid bare url regex"));

/// Resolves a relative permalink against the source's base URL.
///
/// ```
/// use interim_core::full_source_url;
/// assert_eq!(
///     full_source_url("/r/x/comments/abc/", "https://www.reddit.com/"),
///     "https://www.reddit.com/r/x/comments/abc/"
/// );
/// ```
#[must_use]
pub fn full_source_url(permalink: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if permalink.is_empty() || permalink.starts_with('/') {
        format!("{base}{permalink}")
    } else {
        format!("{base}/{permalink}")
    }
}

/// Host of `base_url` without scheme, port, path, or a leading `www.`.
///
/// Links containing this string are treated as internal to the source.
#[must_use]
pub fn source_domain(base_url: &str) -> String {
    let rest = base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest);
    let host_port = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host = host_port.split(':').next().unwrap_or(host_port);
    host.strip_prefix("www.").unwrap_or(host).to_ascii_lowercase()
}

/// Extracts external links from a markdown-ish post body.
///
/// Markdown link targets come first, then bare URLs that remain after every
/// markdown link has been removed, so a URL used both as link text and target
/// is only counted once. The result is deduplicated in first-seen order and
/// excludes any URL containing `source_domain`.
#[must_use]
pub fn external_links(body: &str, source_domain: &str) -> Vec<String> {
    let markdown_urls = MARKDOWN_LINK_RE
        .captures_iter(body)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_owned()));

    let stripped = MARKDOWN_LINK_RE.replace_all(body, "");
    let bare_urls: Vec<String> = BARE_URL_RE
        .find_iter(&stripped)
        .map(|m| m.as_str().to_owned())
        .collect();

    let mut seen = HashSet::new();
    markdown_urls
        .chain(bare_urls)
        .filter(|url| seen.insert(url.clone()))
        .filter(|url| source_domain.is_empty() || !url.contains(source_domain))
        .collect()
}
