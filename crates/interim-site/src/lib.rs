//! Static site and feed rendering for fefe-interim.
//!
//! Everything here is a pure function of the final [`Snapshot`]: an index
//! page, one archive page per month, the copied static assets, and an RSS
//! feed.

pub mod archive;
pub mod assets;
pub mod error;
pub mod feed;
mod html;
pub mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use interim_core::{Post, SiteConfig, Snapshot};

pub use archive::{archive_months, format_date, group_posts_by_month, tag_class, ArchiveMonth};
pub use assets::copy_static_dir;
pub use error::SiteError;
pub use feed::{feed_xml, generate_feed};
pub use markdown::{markdown_to_html, strip_markdown_links};

use html::{render_page, Page};

/// What [`render_site`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub index_path: PathBuf,
    pub archive_pages: usize,
    pub static_copied: bool,
}

/// Writes `index.html`, the monthly archive pages, and the static assets
/// into `site.output_dir`.
///
/// # Errors
///
/// Returns [`SiteError::Io`] on any local filesystem failure.
pub fn render_site(snapshot: &Snapshot, site: &SiteConfig) -> Result<RenderReport, SiteError> {
    let output_dir = site.output_dir.as_path();
    fs::create_dir_all(output_dir).map_err(SiteError::io(output_dir))?;

    let groups = group_posts_by_month(&snapshot.posts);
    let months = archive_months(&groups);

    let all: Vec<&Post> = snapshot.posts.iter().collect();
    let index_html = render_page(&Page::Index, &all, snapshot, &months);
    let index_path = output_dir.join("index.html");
    write_file(&index_path, &index_html)?;
    tracing::info!(path = %index_path.display(), bytes = index_html.len(), "wrote index");

    for (&(year, month), posts) in &groups {
        let label = archive::month_label(year, month);
        let html = render_page(&Page::Archive { label: &label }, posts, snapshot, &months);
        let dir = output_dir.join(year.to_string()).join(format!("{month:02}"));
        fs::create_dir_all(&dir).map_err(SiteError::io(&dir))?;
        write_file(&dir.join("index.html"), &html)?;
    }
    tracing::info!(pages = groups.len(), "wrote archive pages");

    let static_copied = copy_static_dir(&site.static_dir, &output_dir.join("static"))?;
    if static_copied {
        tracing::info!(from = %site.static_dir.display(), "copied static assets");
    } else {
        tracing::debug!(from = %site.static_dir.display(), "no static directory, skipping copy");
    }

    Ok(RenderReport {
        index_path,
        archive_pages: groups.len(),
        static_copied,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    fs::write(path, contents).map_err(SiteError::io(path))
}
