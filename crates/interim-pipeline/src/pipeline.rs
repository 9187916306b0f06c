//! Build-cycle orchestration with cache fallback.

use interim_core::{FilterConfig, PostSource, Snapshot};

use crate::cache::SnapshotStore;
use crate::scorer::filter_posts;

/// How the render input of a build was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Fresh posts survived the filter and were persisted.
    Fresh,
    /// Nothing fresh survived; the stored snapshot is rendered instead.
    Cached,
    /// Nothing fresh and no usable snapshot; an empty site is rendered.
    Empty,
}

impl std::fmt::Display for BuildState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildState::Fresh => write!(f, "fresh"),
            BuildState::Cached => write!(f, "cached"),
            BuildState::Empty => write!(f, "empty"),
        }
    }
}

/// Result of one build cycle: the snapshot to render and where it came from.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub snapshot: Snapshot,
    pub state: BuildState,
}

/// Runs one fetch → filter → persist-or-fallback cycle.
///
/// 1. Fetches up to `limit` posts from `source`.
/// 2. Applies [`filter_posts`] with `filter`.
/// 3. A non-empty result is saved to `store` and returned as
///    [`BuildState::Fresh`]. A failed save is logged and does not change
///    the outcome.
/// 4. An empty result falls back to the stored snapshot, relabelled as
///    cached with `total_fetched = 0` ([`BuildState::Cached`]). The store is
///    not written, so the last good snapshot survives.
/// 5. With no usable snapshot the outcome is an empty post list
///    ([`BuildState::Empty`]).
///
/// Never fails: every upstream or cache problem degrades to a fallback.
pub async fn run_build<S: PostSource>(
    source: &S,
    store: &SnapshotStore,
    filter: &FilterConfig,
    sort: &str,
    limit: usize,
) -> BuildOutcome {
    let label = source.label();

    let fetched = source.fetch_posts(sort, limit).await;
    let total_fetched = fetched.len();
    tracing::info!(source = %label, total_fetched, "fetch complete");

    let filtered = filter_posts(fetched, filter.min_score, filter.min_wilson, filter.top_n);
    tracing::info!(
        total_fetched,
        total_filtered = filtered.len(),
        min_score = filter.min_score,
        "filter complete"
    );

    if !filtered.is_empty() {
        let snapshot = Snapshot::fresh(label, total_fetched, filtered);
        match store.save(&snapshot) {
            Ok(()) => tracing::info!(
                path = %store.path().display(),
                posts = snapshot.posts.len(),
                "snapshot saved"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to save snapshot, continuing with fresh posts"),
        }
        return BuildOutcome {
            snapshot,
            state: BuildState::Fresh,
        };
    }

    match store.load() {
        Ok(Some(cached)) => {
            let snapshot = cached.into_cached();
            tracing::warn!(
                path = %store.path().display(),
                posts = snapshot.posts.len(),
                generated_at = %snapshot.generated_at,
                "no fresh posts, rendering cached snapshot"
            );
            BuildOutcome {
                snapshot,
                state: BuildState::Cached,
            }
        }
        Ok(None) => {
            tracing::warn!(
                path = %store.path().display(),
                "no fresh posts and no snapshot, rendering empty site"
            );
            BuildOutcome {
                snapshot: Snapshot::fresh(label, total_fetched, Vec::new()),
                state: BuildState::Empty,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "no fresh posts and snapshot unusable, rendering empty site");
            BuildOutcome {
                snapshot: Snapshot::fresh(label, total_fetched, Vec::new()),
                state: BuildState::Empty,
            }
        }
    }
}
