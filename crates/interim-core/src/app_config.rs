use std::path::PathBuf;

/// Which remote representation the fetcher reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Paginated listing JSON (`/r/{sub}/{sort}.json`).
    Listing,
    /// Syndication feed (`/r/{sub}/{sort}/.rss`), single page, no vote data.
    Feed,
}

impl std::fmt::Display for FetchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchMode::Listing => write!(f, "listing"),
            FetchMode::Feed => write!(f, "feed"),
        }
    }
}

impl std::str::FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listing" | "json" => Ok(FetchMode::Listing),
            "feed" | "rss" => Ok(FetchMode::Feed),
            other => Err(format!("unknown fetch mode '{other}' (expected listing or feed)")),
        }
    }
}

/// OAuth client credentials for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// Everything the fetcher needs, passed in at construction.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Public base URL; also used to resolve permalinks.
    pub source_base_url: String,
    /// Base URL used once a bearer token has been obtained.
    pub oauth_base_url: String,
    pub token_url: String,
    pub subreddit: String,
    pub user_agent: String,
    pub credentials: Option<Credentials>,
    pub mode: FetchMode,
    /// Posts requested per page (the remote caps this at 100).
    pub page_size: usize,
    pub inter_page_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source_base_url: "https://www.reddit.com".to_owned(),
            oauth_base_url: "https://oauth.reddit.com".to_owned(),
            token_url: "https://www.reddit.com/api/v1/access_token".to_owned(),
            subreddit: "fefe_blog_interim".to_owned(),
            user_agent: "fefe-interim-bot/0.1".to_owned(),
            credentials: None,
            mode: FetchMode::Listing,
            page_size: 100,
            inter_page_delay_ms: 1000,
            request_timeout_secs: 15,
            max_retries: 0,
            retry_backoff_base_secs: 2,
        }
    }
}

/// Parameters of the significance filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub min_score: i64,
    /// Explicit Wilson threshold; `None` means "use the median".
    pub min_wilson: Option<f64>,
    pub top_n: Option<usize>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_score: 3,
            min_wilson: None,
            top_n: None,
        }
    }
}

/// Output locations for the renderer.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Public URL of the generated site, used by the feed's self link.
    pub site_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub filter: FilterConfig,
    pub site: SiteConfig,
    pub sort: String,
    pub limit: usize,
    pub snapshot_path: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Label used for snapshots built from this configuration.
    #[must_use]
    pub fn source_label(&self) -> String {
        format!("r/{}", self.fetch.subreddit)
    }
}
