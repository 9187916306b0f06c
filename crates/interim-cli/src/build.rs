//! The `build` command: one fetch → filter → render cycle.

use interim_core::{AppConfig, FetchMode};
use interim_pipeline::{run_build, SnapshotStore};
use interim_scraper::RedditClient;
use interim_site::{generate_feed, render_site};

use crate::BuildArgs;

/// Applies command-line overrides on top of the environment configuration.
///
/// Feed posts carry no vote data, so in feed mode the score floor drops to
/// zero unless `--min-score` is given explicitly.
pub(crate) fn apply_overrides(config: &mut AppConfig, args: &BuildArgs) -> anyhow::Result<()> {
    if let Some(mode) = args.mode {
        config.fetch.mode = mode;
    }
    if let Some(sort) = &args.sort {
        config.sort.clone_from(sort);
    }
    if let Some(limit) = args.limit {
        config.limit = limit;
    }
    if let Some(min_wilson) = args.min_wilson {
        if !min_wilson.is_finite() {
            anyhow::bail!("--min-wilson must be a finite number, got {min_wilson}");
        }
        config.filter.min_wilson = Some(min_wilson);
    }
    if let Some(top_n) = args.top_n {
        config.filter.top_n = Some(top_n);
    }
    if let Some(output) = &args.output {
        config.site.output_dir.clone_from(output);
    }

    match args.min_score {
        Some(min_score) => config.filter.min_score = min_score,
        None if config.fetch.mode == FetchMode::Feed && config.filter.min_score > 0 => {
            tracing::info!(
                configured = config.filter.min_score,
                "feed mode has no vote data, using min_score 0"
            );
            config.filter.min_score = 0;
        }
        None => {}
    }
    Ok(())
}

pub(crate) async fn run(mut config: AppConfig, args: &BuildArgs) -> anyhow::Result<()> {
    apply_overrides(&mut config, args)?;
    tracing::info!(
        source = %config.source_label(),
        mode = %config.fetch.mode,
        sort = %config.sort,
        limit = config.limit,
        authenticated = config.fetch.credentials.is_some(),
        "starting build"
    );

    let client = RedditClient::new(config.fetch.clone())?;
    let store = SnapshotStore::new(&config.snapshot_path);
    let outcome = run_build(&client, &store, &config.filter, &config.sort, config.limit).await;

    let report = render_site(&outcome.snapshot, &config.site)?;
    let feed_path = generate_feed(
        &outcome.snapshot.posts,
        &config.site.output_dir,
        &config.site.site_url,
    )?;

    tracing::info!(
        state = %outcome.state,
        source = %outcome.snapshot.source,
        total_fetched = outcome.snapshot.total_fetched,
        total_filtered = outcome.snapshot.total_filtered,
        archive_pages = report.archive_pages,
        index = %report.index_path.display(),
        feed = %feed_path.display(),
        "build complete"
    );
    Ok(())
}
