//! Per-record conversion of listing children into [`RawPost`]s.

use interim_core::RawPost;

use crate::error::ScraperError;
use crate::types::ListingChild;

/// Parses one `data.children[]` entry of a listing page.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidPost`] if the child lacks a usable `id`
/// or any field has the wrong type. Callers log and skip the record.
pub(crate) fn parse_listing_child(child: &serde_json::Value) -> Result<RawPost, ScraperError> {
    let id_hint = child
        .pointer("/data/id")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("<unknown>")
        .to_owned();

    let parsed: ListingChild =
        serde_json::from_value(child.clone()).map_err(|e| ScraperError::InvalidPost {
            id: id_hint.clone(),
            reason: e.to_string(),
        })?;
    let data = parsed.data;

    if data.id.trim().is_empty() {
        return Err(ScraperError::InvalidPost {
            id: id_hint,
            reason: "empty id".to_owned(),
        });
    }

    Ok(RawPost {
        id: data.id,
        title: data.title,
        body: data.selftext,
        score: data.score,
        num_comments: data.num_comments,
        created_utc: data.created_utc,
        permalink: data.permalink,
        url: data.url,
        flair: data.link_flair_text.filter(|f| !f.is_empty()),
        upvote_ratio: data.upvote_ratio,
        author: data.author,
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
