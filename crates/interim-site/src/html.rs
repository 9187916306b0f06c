//! HTML page assembly for the index and the monthly archive pages.

use std::fmt::Write as _;

use interim_core::{Post, Snapshot};
use quick_xml::escape::escape;

use crate::archive::{format_date, tag_class, ArchiveMonth};
use crate::markdown::markdown_to_html;

pub(crate) const SITE_TITLE: &str = "fefe's blog · interim";
pub(crate) const SITE_DESCRIPTION: &str =
    "Kuratierte Posts aus r/fefe_blog_interim, inoffizieller Ersatz während fefes Pause";

/// Which page is being rendered; decides relative link prefixes.
pub(crate) enum Page<'a> {
    Index,
    Archive { label: &'a str },
}

impl Page<'_> {
    fn root(&self) -> &'static str {
        match self {
            Page::Index => "",
            Page::Archive { .. } => "../../",
        }
    }
}

pub(crate) fn render_page(
    page: &Page<'_>,
    posts: &[&Post],
    snapshot: &Snapshot,
    months: &[ArchiveMonth],
) -> String {
    let root = page.root();
    let heading = match page {
        Page::Index => SITE_TITLE.to_owned(),
        Page::Archive { label } => format!("Archiv: {label}"),
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="de">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{root}static/style.css">
<link rel="alternate" type="application/rss+xml" title="{site}" href="{root}feed.xml">
</head>
<body>
<header class="site-header">
<h1><a href="{root}index.html">{site}</a></h1>
<p class="description">{description}</p>
</header>
<div class="layout">
<main>
<h2 class="page-title">{title}</h2>
"#,
        title = escape(heading.as_str()),
        site = escape(SITE_TITLE),
        description = escape(SITE_DESCRIPTION),
    );

    if posts.is_empty() {
        html.push_str("<p class=\"empty\">Keine Posts verfügbar.</p>\n");
    }
    for post in posts {
        render_post(&mut html, post);
    }

    html.push_str("</main>\n");
    render_sidebar(&mut html, root, months);
    html.push_str("</div>\n");

    let _ = write!(
        html,
        r#"<footer class="site-footer">
<p>Quelle: {source} · {filtered} von {fetched} Posts · Stand {generated}</p>
</footer>
</body>
</html>
"#,
        source = escape(snapshot.source.as_str()),
        filtered = snapshot.total_filtered,
        fetched = snapshot.total_fetched,
        generated = snapshot.generated_at.format("%Y-%m-%d %H:%M UTC"),
    );
    html
}

fn render_post(html: &mut String, post: &Post) {
    let tag = tag_class(post.flair.as_deref());
    let class = if tag.is_empty() {
        "post".to_owned()
    } else {
        format!("post {tag}")
    };

    let _ = write!(
        html,
        r#"<article class="{class}" id="post-{id}">
<header>
<h3><a href="{url}" target="_blank">{title}</a></h3>
<p class="meta"><time>{date}</time> · {score} Punkte · {comments} Kommentare · u/{author}"#,
        id = escape(post.id.as_str()),
        url = escape(post.reddit_url.as_str()),
        title = escape(post.title.as_str()),
        date = format_date(post.created_utc),
        score = post.score,
        comments = post.num_comments,
        author = escape(post.author.as_str()),
    );
    if let Some(flair) = post.flair.as_deref().filter(|f| !f.is_empty()) {
        let _ = write!(
            html,
            r#" · <span class="tag {tag}">{flair}</span>"#,
            tag = escape(tag.as_str()),
            flair = escape(flair),
        );
    }
    html.push_str("</p>\n</header>\n<div class=\"body\">\n");
    html.push_str(&markdown_to_html(&post.body));
    html.push_str("\n</div>\n");

    if !post.external_links.is_empty() {
        html.push_str("<ul class=\"links\">\n");
        for link in &post.external_links {
            let link = escape(link.as_str());
            let _ = writeln!(
                html,
                r#"<li><a href="{link}" target="_blank" rel="noopener">{link}</a></li>"#
            );
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</article>\n");
}

fn render_sidebar(html: &mut String, root: &str, months: &[ArchiveMonth]) {
    html.push_str("<aside class=\"archive\">\n<h2>Archiv</h2>\n<ul>\n");
    for month in months {
        let _ = writeln!(
            html,
            r#"<li><a href="{root}{path}">{label}</a> <span class="count">({count})</span></li>"#,
            path = month.path,
            label = escape(month.label.as_str()),
            count = month.count,
        );
    }
    html.push_str("</ul>\n</aside>\n");
}
