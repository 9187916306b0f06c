use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn config_with(pairs: &[(&'static str, &'static str)]) -> Result<AppConfig, ConfigError> {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    build_app_config(lookup_from_map(&map))
}

#[test]
fn empty_environment_yields_defaults() {
    let cfg = config_with(&[]).expect("defaults should be valid");
    assert_eq!(cfg.fetch.source_base_url, "https://www.reddit.com");
    assert_eq!(cfg.fetch.oauth_base_url, "https://oauth.reddit.com");
    assert_eq!(cfg.fetch.subreddit, "fefe_blog_interim");
    assert_eq!(cfg.fetch.mode, FetchMode::Listing);
    assert_eq!(cfg.fetch.page_size, 100);
    assert_eq!(cfg.fetch.inter_page_delay_ms, 1000);
    assert_eq!(cfg.fetch.request_timeout_secs, 15);
    assert_eq!(cfg.fetch.max_retries, 0);
    assert!(cfg.fetch.credentials.is_none());
    assert_eq!(cfg.filter, FilterConfig::default());
    assert_eq!(cfg.sort, "new");
    assert_eq!(cfg.limit, 500);
    assert_eq!(cfg.snapshot_path, PathBuf::from("data/posts.json"));
    assert_eq!(cfg.site.output_dir, PathBuf::from("output"));
    assert_eq!(cfg.site.site_url, "");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.source_label(), "r/fefe_blog_interim");
}

#[test]
fn both_credentials_enable_oauth() {
    let cfg = config_with(&[
        ("REDDIT_CLIENT_ID", "id"),
        ("REDDIT_CLIENT_SECRET", "secret"),
    ])
    .unwrap();
    let creds = cfg.fetch.credentials.expect("credentials should be set");
    assert_eq!(creds.client_id, "id");
    assert_eq!(creds.client_secret, "secret");
}

#[test]
fn credentials_debug_output_is_redacted() {
    let cfg = config_with(&[
        ("REDDIT_CLIENT_ID", "id"),
        ("REDDIT_CLIENT_SECRET", "hunter2"),
    ])
    .unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("hunter2"), "secret leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn blank_credentials_are_treated_as_absent() {
    let cfg = config_with(&[("REDDIT_CLIENT_ID", "  "), ("REDDIT_CLIENT_SECRET", "")]).unwrap();
    assert!(cfg.fetch.credentials.is_none());
}

#[test]
fn only_client_id_is_an_error() {
    let result = config_with(&[("REDDIT_CLIENT_ID", "id")]);
    assert!(
        matches!(result, Err(ConfigError::IncompleteCredentials { ref present }) if present == "REDDIT_CLIENT_ID"),
        "expected IncompleteCredentials, got: {result:?}"
    );
}

#[test]
fn only_client_secret_is_an_error() {
    let result = config_with(&[("REDDIT_CLIENT_SECRET", "secret")]);
    assert!(
        matches!(result, Err(ConfigError::IncompleteCredentials { ref present }) if present == "REDDIT_CLIENT_SECRET"),
        "expected IncompleteCredentials, got: {result:?}"
    );
}

#[test]
fn fetch_mode_feed_is_recognised() {
    let cfg = config_with(&[("INTERIM_FETCH_MODE", "feed")]).unwrap();
    assert_eq!(cfg.fetch.mode, FetchMode::Feed);
}

#[test]
fn unknown_fetch_mode_is_invalid() {
    let result = config_with(&[("INTERIM_FETCH_MODE", "scrape")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INTERIM_FETCH_MODE"),
        "expected InvalidEnvVar(INTERIM_FETCH_MODE), got: {result:?}"
    );
}

#[test]
fn page_size_above_remote_cap_is_invalid() {
    let result = config_with(&[("INTERIM_PAGE_SIZE", "101")]);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INTERIM_PAGE_SIZE"),
        "expected InvalidEnvVar(INTERIM_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn page_size_zero_is_invalid() {
    let result = config_with(&[("INTERIM_PAGE_SIZE", "0")]);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INTERIM_PAGE_SIZE"
    ));
}

#[test]
fn inter_page_delay_override() {
    let cfg = config_with(&[("INTERIM_INTER_PAGE_DELAY_MS", "250")]).unwrap();
    assert_eq!(cfg.fetch.inter_page_delay_ms, 250);
}

#[test]
fn inter_page_delay_invalid() {
    let result = config_with(&[("INTERIM_INTER_PAGE_DELAY_MS", "soon")]);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INTERIM_INTER_PAGE_DELAY_MS"
    ));
}

#[test]
fn filter_overrides_are_parsed() {
    let cfg = config_with(&[
        ("INTERIM_MIN_SCORE", "0"),
        ("INTERIM_MIN_WILSON", "0.42"),
        ("INTERIM_TOP_N", "25"),
    ])
    .unwrap();
    assert_eq!(cfg.filter.min_score, 0);
    assert_eq!(cfg.filter.min_wilson, Some(0.42));
    assert_eq!(cfg.filter.top_n, Some(25));
}

#[test]
fn min_wilson_must_be_numeric() {
    let result = config_with(&[("INTERIM_MIN_WILSON", "high")]);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INTERIM_MIN_WILSON"
    ));
}

#[test]
fn min_wilson_rejects_nan() {
    let result = config_with(&[("INTERIM_MIN_WILSON", "NaN")]);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INTERIM_MIN_WILSON"
    ));
}

#[test]
fn top_n_must_be_unsigned() {
    let result = config_with(&[("INTERIM_TOP_N", "-3")]);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INTERIM_TOP_N"
    ));
}

#[test]
fn site_url_trailing_slash_is_trimmed() {
    let cfg = config_with(&[("INTERIM_SITE_URL", "https://interim.example.org/")]).unwrap();
    assert_eq!(cfg.site.site_url, "https://interim.example.org");
}

#[test]
fn subreddit_override_changes_source_label() {
    let cfg = config_with(&[("INTERIM_SUBREDDIT", "rust")]).unwrap();
    assert_eq!(cfg.source_label(), "r/rust");
}
