use interim_core::RawPost;

use super::*;

fn post(id: &str, score: i64, upvote_ratio: f64) -> Post {
    RawPost {
        id: id.to_owned(),
        title: format!("Post {id}"),
        score,
        upvote_ratio,
        permalink: format!("/r/test/comments/{id}/"),
        ..RawPost::default()
    }
    .into_post("https://www.reddit.com")
}

fn ids(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.id.as_str()).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// wilson_score_lower_bound
// ---------------------------------------------------------------------------

#[test]
fn known_values() {
    assert_close(wilson_score_lower_bound(0.75, 150), 0.675_047);
    assert_close(wilson_score_lower_bound(1.0, 5), 0.565_509);
    assert_close(wilson_score_lower_bound(0.9, 10), 0.595_844);
    assert_close(wilson_score_lower_bound(0.5, 100), 0.403_830);
    assert_close(wilson_score_lower_bound(0.95, 400), 0.924_036);
}

#[test]
fn zero_and_negative_sample_sizes_score_zero() {
    assert!(wilson_score_lower_bound(0.9, 0).abs() < f64::EPSILON);
    assert!(wilson_score_lower_bound(1.0, -4).abs() < f64::EPSILON);
}

#[test]
fn lower_bound_stays_within_zero_and_ratio() {
    for &p in &[0.0, 0.1, 0.33, 0.5, 0.75, 0.9, 1.0] {
        for n in [1_i64, 2, 3, 5, 10, 50, 100, 1_000, 100_000] {
            let w = wilson_score_lower_bound(p, n);
            assert!(w >= -1e-12, "wlb({p}, {n}) = {w} is negative");
            assert!(w <= p + 1e-12, "wlb({p}, {n}) = {w} exceeds p");
        }
    }
}

#[test]
fn lower_bound_is_monotone_in_sample_size() {
    for &p in &[0.2, 0.5, 0.8, 1.0] {
        let mut previous = 0.0;
        for n in 1..=500 {
            let w = wilson_score_lower_bound(p, n);
            assert!(
                w >= previous - 1e-12,
                "wlb({p}, {n}) = {w} dropped below {previous}"
            );
            previous = w;
        }
    }
}

#[test]
fn explicit_z_widens_the_interval() {
    let narrow = wilson_score_lower_bound_with_z(0.8, 20, 1.0);
    let wide = wilson_score_lower_bound_with_z(0.8, 20, 2.58);
    assert!(narrow > wide);
    assert_close(wilson_score_lower_bound_with_z(0.8, 20, Z_95), 0.583_978);
}

// ---------------------------------------------------------------------------
// median / compute_wilson_scores
// ---------------------------------------------------------------------------

#[test]
fn median_of_empty_is_none() {
    assert_eq!(median(&[]), None);
}

#[test]
fn median_odd_and_even() {
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
}

#[test]
fn compute_wilson_scores_keeps_input_order() {
    let posts = vec![post("a", 5, 1.0), post("b", 150, 0.75)];
    let scored = compute_wilson_scores(&posts);
    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].0.id, "a");
    assert_close(scored[0].1, 0.565_509);
    assert_close(scored[1].1, 0.675_047);
}

// ---------------------------------------------------------------------------
// filter_posts
// ---------------------------------------------------------------------------

#[test]
fn empty_input_yields_empty_output() {
    assert!(filter_posts(Vec::new(), 3, None, None).is_empty());
}

#[test]
fn huge_min_score_discards_everything() {
    let posts = vec![post("a", 150, 0.75), post("b", 5, 1.0)];
    assert!(filter_posts(posts, 1_000_000_000, None, None).is_empty());
}

#[test]
fn posts_below_min_score_are_dropped_before_scoring() {
    let posts = vec![post("a", 150, 0.75), post("low", 2, 1.0)];
    let kept = filter_posts(posts, 3, Some(0.0), None);
    assert_eq!(ids(&kept), vec!["a"]);
}

#[test]
fn large_sample_outranks_small_perfect_sample() {
    // A: wlb ~0.675, B: wlb ~0.566. The two-element median (~0.620) sits
    // between them, so only A clears the adaptive threshold.
    let posts = vec![post("b", 5, 1.0), post("a", 150, 0.75)];
    let kept = filter_posts(posts.clone(), 3, None, None);
    assert_eq!(ids(&kept), vec!["a"]);

    let kept = filter_posts(posts, 3, Some(0.0), None);
    assert_eq!(ids(&kept), vec!["a", "b"]);
}

#[test]
fn median_threshold_keeps_the_median_post() {
    let posts = vec![
        post("low", 10, 0.5),
        post("mid", 10, 0.7),
        post("high", 10, 0.9),
    ];
    let kept = filter_posts(posts, 3, None, None);
    assert_eq!(ids(&kept), vec!["high", "mid"]);
}

#[test]
fn ties_keep_input_order() {
    let posts = vec![
        post("first", 20, 0.8),
        post("second", 20, 0.8),
        post("third", 20, 0.8),
    ];
    let kept = filter_posts(posts, 3, None, None);
    assert_eq!(ids(&kept), vec!["first", "second", "third"]);
}

#[test]
fn top_n_truncates_after_sorting() {
    let posts = vec![
        post("c", 10, 0.6),
        post("a", 400, 0.95),
        post("b", 50, 0.9),
    ];
    let kept = filter_posts(posts, 3, Some(0.0), Some(2));
    assert_eq!(ids(&kept), vec!["a", "b"]);
}

#[test]
fn explicit_threshold_is_used_verbatim() {
    let posts = vec![post("a", 150, 0.75), post("b", 10, 0.9)];
    // b scores ~0.596, a ~0.675.
    let kept = filter_posts(posts, 3, Some(0.6), None);
    assert_eq!(ids(&kept), vec!["a"]);
}

#[test]
fn explicit_threshold_filtering_is_idempotent() {
    let posts = vec![
        post("a", 150, 0.75),
        post("b", 5, 1.0),
        post("c", 10, 0.9),
        post("d", 3, 0.6),
        post("e", 1, 1.0),
    ];
    let once = filter_posts(posts, 3, Some(0.5), None);
    let twice = filter_posts(once.clone(), 3, Some(0.5), None);
    assert_eq!(once, twice);
}

#[test]
fn adaptive_filtering_is_deterministic() {
    let posts = vec![
        post("a", 150, 0.75),
        post("b", 5, 1.0),
        post("c", 10, 0.9),
        post("d", 50, 0.9),
    ];
    let first = filter_posts(posts.clone(), 3, None, None);
    let second = filter_posts(posts, 3, None, None);
    assert_eq!(first, second);
}
