//! Significance filtering and the cache-fallback build controller.

pub mod cache;
pub mod error;
pub mod pipeline;
pub mod scorer;

pub use cache::SnapshotStore;
pub use error::CacheError;
pub use pipeline::{run_build, BuildOutcome, BuildState};
pub use scorer::{
    compute_wilson_scores, filter_posts, median, wilson_score_lower_bound,
    wilson_score_lower_bound_with_z, Z_95,
};
