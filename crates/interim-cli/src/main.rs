mod build;
mod inspect;

use clap::{Args, Parser, Subcommand};
use interim_core::FetchMode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "interim")]
#[command(about = "Mirror r/fefe_blog_interim into a static site and RSS feed")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, filter, and render the site (the default)
    Build(BuildArgs),
    /// Fetch posts and print their Wilson scores without writing anything
    Scores {
        /// Maximum number of posts to fetch
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print metadata of the stored snapshot
    Snapshot,
}

/// Overrides for the configured fetch and filter options.
#[derive(Debug, Default, Clone, PartialEq, Args)]
struct BuildArgs {
    /// Fetch variant: `listing` or `feed`
    #[arg(long)]
    mode: Option<FetchMode>,

    /// Listing sort order (`new`, `hot`, `top`, ...)
    #[arg(long)]
    sort: Option<String>,

    /// Maximum number of posts to fetch
    #[arg(long)]
    limit: Option<usize>,

    /// Discard posts with fewer points than this
    #[arg(long, allow_negative_numbers = true)]
    min_score: Option<i64>,

    /// Explicit Wilson threshold instead of the adaptive median
    #[arg(long)]
    min_wilson: Option<f64>,

    /// Keep at most this many posts
    #[arg(long)]
    top_n: Option<usize>,

    /// Output directory for the rendered site
    #[arg(long)]
    output: Option<std::path::PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = interim_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Build(args)) => build::run(config, &args).await,
        None => build::run(config, &BuildArgs::default()).await,
        Some(Commands::Scores { limit }) => inspect::scores(&config, limit).await,
        Some(Commands::Snapshot) => inspect::snapshot(&config),
    }
}
