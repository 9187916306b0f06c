//! Wilson-score significance filter.
//!
//! Posts are ranked by the lower bound of the Wilson score interval on their
//! upvote ratio, using the post score as the sample size. Small samples are
//! penalised even when the raw ratio is high, so 150 votes at 75% rank above
//! 5 votes at 100%.

use interim_core::Post;

/// z-value for a 95% confidence interval.
pub const Z_95: f64 = 1.96;

/// Wilson lower bound at 95% confidence. See [`wilson_score_lower_bound_with_z`].
#[must_use]
pub fn wilson_score_lower_bound(p: f64, n: i64) -> f64 {
    wilson_score_lower_bound_with_z(p, n, Z_95)
}

/// Lower bound of the Wilson score interval for a proportion `p` observed
/// over `n` samples.
///
/// Returns `0.0` for `n <= 0`.
///
/// ```
/// use interim_pipeline::wilson_score_lower_bound;
/// let big = wilson_score_lower_bound(0.75, 150);
/// let small = wilson_score_lower_bound(1.0, 5);
/// assert!(big > small);
/// assert_eq!(wilson_score_lower_bound(0.9, 0), 0.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn wilson_score_lower_bound_with_z(p: f64, n: i64, z: f64) -> f64 {
    if n <= 0 {
        return 0.0;
    }
    let n = n as f64;
    let z2 = z * z;
    let centre = p + z2 / (2.0 * n);
    let margin = z * ((p * (1.0 - p) + z2 / (4.0 * n)) / n).sqrt();
    (centre - margin) / (1.0 + z2 / n)
}

/// Pairs every post with its Wilson lower bound, in input order.
#[must_use]
pub fn compute_wilson_scores(posts: &[Post]) -> Vec<(&Post, f64)> {
    posts
        .iter()
        .map(|post| (post, wilson_score_lower_bound(post.upvote_ratio, post.score)))
        .collect()
}

/// Median of `values`; the mean of the two middle values for even counts.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Filters and ranks posts by significance.
///
/// 1. Drops posts with `score < min_score`.
/// 2. Scores the rest with [`wilson_score_lower_bound`].
/// 3. Keeps those at or above `min_wilson`, or at or above the median score
///    of the step-1 survivors when no threshold is given.
/// 4. Sorts by Wilson score descending. The sort is stable: ties keep
///    their input order.
/// 5. Truncates to `top_n`.
///
/// The median threshold is recomputed from whatever is passed in, so
/// running the filter on its own output can drop further posts.
#[must_use]
pub fn filter_posts(
    posts: Vec<Post>,
    min_score: i64,
    min_wilson: Option<f64>,
    top_n: Option<usize>,
) -> Vec<Post> {
    let candidates: Vec<Post> = posts.into_iter().filter(|p| p.score >= min_score).collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(Post, f64)> = candidates
        .into_iter()
        .map(|post| {
            let wilson = wilson_score_lower_bound(post.upvote_ratio, post.score);
            (post, wilson)
        })
        .collect();

    let threshold = match min_wilson {
        Some(explicit) => explicit,
        None => {
            let values: Vec<f64> = scored.iter().map(|(_, w)| *w).collect();
            median(&values).unwrap_or(0.0)
        }
    };

    scored.retain(|(_, wilson)| *wilson >= threshold);
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut kept: Vec<Post> = scored.into_iter().map(|(post, _)| post).collect();
    if let Some(n) = top_n {
        kept.truncate(n);
    }

    tracing::debug!(
        threshold,
        adaptive = min_wilson.is_none(),
        kept = kept.len(),
        "significance filter applied"
    );
    kept
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
