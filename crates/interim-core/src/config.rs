use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Credentials, FetchConfig, FetchMode, FilterConfig, SiteConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; absent variables take the documented default.
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let non_empty = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let defaults = FetchConfig::default();

    let credentials = match (non_empty("REDDIT_CLIENT_ID"), non_empty("REDDIT_CLIENT_SECRET")) {
        (Some(client_id), Some(client_secret)) => Some(Credentials {
            client_id,
            client_secret,
        }),
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConfigError::IncompleteCredentials {
                present: "REDDIT_CLIENT_ID".to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(ConfigError::IncompleteCredentials {
                present: "REDDIT_CLIENT_SECRET".to_string(),
            })
        }
    };

    let mode = FetchMode::from_str(&or_default("INTERIM_FETCH_MODE", "listing"))
        .map_err(|reason| invalid("INTERIM_FETCH_MODE", reason))?;

    let page_size = parse_usize("INTERIM_PAGE_SIZE", "100")?;
    if !(1..=100).contains(&page_size) {
        return Err(invalid(
            "INTERIM_PAGE_SIZE",
            format!("{page_size} is outside 1..=100"),
        ));
    }

    let fetch = FetchConfig {
        source_base_url: or_default("INTERIM_SOURCE_BASE_URL", &defaults.source_base_url),
        oauth_base_url: or_default("INTERIM_OAUTH_BASE_URL", &defaults.oauth_base_url),
        token_url: or_default("INTERIM_TOKEN_URL", &defaults.token_url),
        subreddit: or_default("INTERIM_SUBREDDIT", &defaults.subreddit),
        user_agent: or_default("INTERIM_USER_AGENT", &defaults.user_agent),
        credentials,
        mode,
        page_size,
        inter_page_delay_ms: parse_u64("INTERIM_INTER_PAGE_DELAY_MS", "1000")?,
        request_timeout_secs: parse_u64("INTERIM_REQUEST_TIMEOUT_SECS", "15")?,
        max_retries: parse_u32("INTERIM_MAX_RETRIES", "0")?,
        retry_backoff_base_secs: parse_u64("INTERIM_RETRY_BACKOFF_BASE_SECS", "2")?,
    };

    let min_score = or_default("INTERIM_MIN_SCORE", "3")
        .parse::<i64>()
        .map_err(|e| invalid("INTERIM_MIN_SCORE", e.to_string()))?;

    let min_wilson = non_empty("INTERIM_MIN_WILSON")
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|e| invalid("INTERIM_MIN_WILSON", e.to_string()))
                .and_then(|v| {
                    if v.is_finite() {
                        Ok(v)
                    } else {
                        Err(invalid("INTERIM_MIN_WILSON", format!("{v} is not finite")))
                    }
                })
        })
        .transpose()?;

    let top_n = non_empty("INTERIM_TOP_N")
        .map(|raw| {
            raw.parse::<usize>()
                .map_err(|e| invalid("INTERIM_TOP_N", e.to_string()))
        })
        .transpose()?;

    let site = SiteConfig {
        output_dir: PathBuf::from(or_default("INTERIM_OUTPUT_DIR", "output")),
        static_dir: PathBuf::from(or_default("INTERIM_STATIC_DIR", "static")),
        site_url: or_default("INTERIM_SITE_URL", "")
            .trim_end_matches('/')
            .to_string(),
    };

    Ok(AppConfig {
        fetch,
        filter: FilterConfig {
            min_score,
            min_wilson,
            top_n,
        },
        site,
        sort: or_default("INTERIM_FETCH_SORT", "new"),
        limit: parse_usize("INTERIM_FETCH_LIMIT", "500")?,
        snapshot_path: PathBuf::from(or_default("INTERIM_SNAPSHOT_PATH", "data/posts.json")),
        log_level: or_default("INTERIM_LOG_LEVEL", "info"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
