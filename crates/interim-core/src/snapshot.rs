use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::post::Post;

/// Suffix appended to the source label when a build falls back to the
/// stored snapshot.
pub const CACHED_LABEL_SUFFIX: &str = " (cached)";

/// The last known-good filtered post list, as persisted to disk and handed
/// to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the contained posts were fetched and filtered.
    pub generated_at: DateTime<Utc>,
    /// Human-readable source label, e.g. `r/fefe_blog_interim`.
    pub source: String,
    pub total_fetched: usize,
    pub total_filtered: usize,
    pub posts: Vec<Post>,
}

impl Snapshot {
    /// Snapshot of a fresh fetch+filter cycle stamped with the current time.
    #[must_use]
    pub fn fresh(source: impl Into<String>, total_fetched: usize, posts: Vec<Post>) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            total_fetched,
            total_filtered: posts.len(),
            posts,
        }
    }

    /// Snapshot with no posts, used when neither a fresh result nor a cached
    /// one is available.
    #[must_use]
    pub fn empty(source: impl Into<String>) -> Self {
        Self::fresh(source, 0, Vec::new())
    }

    /// Re-labels a stored snapshot for rendering as a fallback: the fetched
    /// count drops to zero and the source label is marked as cached.
    #[must_use]
    pub fn into_cached(mut self) -> Self {
        self.total_fetched = 0;
        if !self.source.ends_with(CACHED_LABEL_SUFFIX) {
            self.source.push_str(CACHED_LABEL_SUFFIX);
        }
        self
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.source.ends_with(CACHED_LABEL_SUFFIX)
    }
}
