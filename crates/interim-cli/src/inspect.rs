//! Read-only commands: `scores` and `snapshot`.

use interim_core::{AppConfig, PostSource};
use interim_pipeline::{compute_wilson_scores, SnapshotStore};
use interim_scraper::RedditClient;

/// Fetches posts and prints each one's Wilson lower bound, newest-first.
pub(crate) async fn scores(config: &AppConfig, limit: Option<usize>) -> anyhow::Result<()> {
    let client = RedditClient::new(config.fetch.clone())?;
    let posts = client
        .fetch_posts(&config.sort, limit.unwrap_or(config.limit))
        .await;

    if posts.is_empty() {
        tracing::warn!("no posts fetched");
        return Ok(());
    }

    println!("{:>7}  {:>6}  {:>5}  {:<10}  title", "wilson", "score", "ratio", "id");
    for (post, wilson) in compute_wilson_scores(&posts) {
        println!(
            "{wilson:>7.4}  {:>6}  {:>5.2}  {:<10}  {}",
            post.score, post.upvote_ratio, post.id, post.title
        );
    }
    Ok(())
}

/// Prints the stored snapshot's metadata as JSON.
pub(crate) fn snapshot(config: &AppConfig) -> anyhow::Result<()> {
    let store = SnapshotStore::new(&config.snapshot_path);
    match store.load() {
        Ok(Some(snapshot)) => {
            let summary = serde_json::json!({
                "path": store.path().display().to_string(),
                "generated_at": snapshot.generated_at,
                "source": snapshot.source,
                "total_fetched": snapshot.total_fetched,
                "total_filtered": snapshot.total_filtered,
                "posts": snapshot.posts.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Ok(None) => {
            tracing::warn!(path = %store.path().display(), "no snapshot stored yet");
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored snapshot is unusable");
        }
    }
    Ok(())
}
