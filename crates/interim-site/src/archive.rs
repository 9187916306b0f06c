//! Month grouping and date helpers for the archive pages.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use interim_core::Post;

pub const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// One entry of the archive sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMonth {
    pub year: i32,
    pub month: u32,
    /// e.g. `März 2024`.
    pub label: String,
    pub count: usize,
    /// Relative to the site root, e.g. `2024/03/index.html`.
    pub path: String,
}

/// Posts keyed by `(year, month)` in UTC.
pub type MonthGroups<'a> = BTreeMap<(i32, u32), Vec<&'a Post>>;

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn post_datetime(created_utc: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis((created_utc * 1000.0).round() as i64)
}

/// `YYYY-MM-DD · HH:MM` in UTC, or an empty string for an out-of-range
/// timestamp.
#[must_use]
pub fn format_date(created_utc: f64) -> String {
    post_datetime(created_utc)
        .map(|dt| dt.format("%Y-%m-%d · %H:%M").to_string())
        .unwrap_or_default()
}

/// CSS class for a flair: `tag-{lowercase flair}`, empty without flair.
#[must_use]
pub fn tag_class(flair: Option<&str>) -> String {
    match flair {
        Some(f) if !f.is_empty() => format!("tag-{}", f.to_lowercase()),
        _ => String::new(),
    }
}

/// `"{German month} {year}"`.
#[must_use]
pub fn month_label(year: i32, month: u32) -> String {
    let name = month
        .checked_sub(1)
        .and_then(|i| GERMAN_MONTHS.get(i as usize))
        .copied()
        .unwrap_or("?");
    format!("{name} {year}")
}

/// Groups posts by UTC month, each group newest-first. Posts whose
/// timestamp is out of range are left out.
#[must_use]
pub fn group_posts_by_month(posts: &[Post]) -> MonthGroups<'_> {
    let mut groups: MonthGroups<'_> = BTreeMap::new();
    for post in posts {
        let Some(dt) = post_datetime(post.created_utc) else {
            tracing::warn!(id = %post.id, created_utc = post.created_utc, "post timestamp out of range");
            continue;
        };
        groups.entry((dt.year(), dt.month())).or_default().push(post);
    }
    for month_posts in groups.values_mut() {
        month_posts.sort_by(|a, b| b.created_utc.total_cmp(&a.created_utc));
    }
    groups
}

/// Sidebar entries, newest month first.
#[must_use]
pub fn archive_months(groups: &MonthGroups<'_>) -> Vec<ArchiveMonth> {
    groups
        .iter()
        .rev()
        .map(|(&(year, month), posts)| ArchiveMonth {
            year,
            month,
            label: month_label(year, month),
            count: posts.len(),
            path: format!("{year}/{month:02}/index.html"),
        })
        .collect()
}
