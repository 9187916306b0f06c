//! HTTP client for the subreddit listing and feed endpoints.

mod fetch_all;

use std::time::Duration;

use interim_core::FetchConfig;
use reqwest::Client;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{Listing, TokenResponse};

/// Maximum number of listing pages requested in one fetch.
/// Guards against a cursor that never runs out.
pub(super) const MAX_PAGES: usize = 200;

/// The remote's hard cap on `limit` for listing and feed requests.
pub(super) const REMOTE_PAGE_CAP: usize = 100;

const TOKEN_TIMEOUT_SECS: u64 = 10;

/// Where listing requests go for the current fetch, and with what auth.
#[derive(Debug, Clone)]
pub(super) struct Session {
    pub(super) base_url: String,
    pub(super) bearer: Option<String>,
}

/// Client for one subreddit.
///
/// Reads the public listing anonymously unless client credentials are
/// configured, in which case a client-credentials token is exchanged at the
/// start of each fetch and listing requests go to the OAuth host.
///
/// Transient errors (429, 5xx, network failures) are retried with
/// exponential backoff up to `max_retries` additional attempts per page.
pub struct RedditClient {
    pub(super) client: Client,
    pub(super) config: FetchConfig,
}

impl RedditClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: FetchConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Opens a session: authenticated when credentials are configured and
    /// the exchange succeeds, anonymous otherwise.
    pub(super) async fn open_session(&self) -> Session {
        let anonymous = Session {
            base_url: self.config.source_base_url.clone(),
            bearer: None,
        };
        let Some(credentials) = &self.config.credentials else {
            return anonymous;
        };

        match self
            .fetch_token(&credentials.client_id, &credentials.client_secret)
            .await
        {
            Ok(token) => {
                tracing::debug!(oauth_base_url = %self.config.oauth_base_url, "obtained reddit access token");
                Session {
                    base_url: self.config.oauth_base_url.clone(),
                    bearer: Some(token),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "token exchange failed, falling back to anonymous access");
                anonymous
            }
        }
    }

    /// Exchanges client credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Token`] on a non-2xx status or a response
    /// without `access_token`, and [`ScraperError::Http`] on network failure.
    async fn fetch_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, ScraperError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .timeout(Duration::from_secs(TOKEN_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScraperError::Token(format!(
                "token endpoint returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: "token response".to_owned(),
                source: e,
            })?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ScraperError::Token("response carried no access_token".to_owned()))
    }

    /// Fetches one listing page, retrying transient errors.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network or timeout failure after all retries.
    /// - [`ScraperError::Deserialize`]: the body is not a listing envelope.
    pub(super) async fn fetch_listing_page(
        &self,
        session: &Session,
        sort: &str,
        limit: usize,
        after: Option<&str>,
    ) -> Result<Listing, ScraperError> {
        let url = self.listing_url(&session.base_url, sort, limit, after)?;

        retry_with_backoff(
            self.config.max_retries,
            self.config.retry_backoff_base_secs,
            || {
                let url = url.clone();
                async move {
                    let body = self.get_text(&url, session.bearer.as_deref()).await?;
                    serde_json::from_str::<Listing>(&body).map_err(|e| {
                        ScraperError::Deserialize {
                            context: format!("listing page from {url}"),
                            source: e,
                        }
                    })
                }
            },
        )
        .await
    }

    /// Fetches the feed document for `sort`, retrying transient errors.
    ///
    /// # Errors
    ///
    /// Same transport errors as [`Self::fetch_listing_page`].
    pub(super) async fn fetch_feed_document(
        &self,
        sort: &str,
        limit: usize,
    ) -> Result<String, ScraperError> {
        let url = self.feed_url(sort, limit)?;
        retry_with_backoff(
            self.config.max_retries,
            self.config.retry_backoff_base_secs,
            || {
                let url = url.clone();
                async move { self.get_text(&url, None).await }
            },
        )
        .await
    }

    async fn get_text(&self, url: &str, bearer: Option<&str>) -> Result<String, ScraperError> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ScraperError::RateLimited {
                url: url.to_owned(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// `{base}/r/{subreddit}/{sort}.json?limit=N[&after=CURSOR]`
    fn listing_url(
        &self,
        base_url: &str,
        sort: &str,
        limit: usize,
        after: Option<&str>,
    ) -> Result<String, ScraperError> {
        let base = format!(
            "{}/r/{}/{sort}.json",
            base_url.trim_end_matches('/'),
            self.config.subreddit
        );
        let mut url = reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        if let Some(cursor) = after {
            url.query_pairs_mut().append_pair("after", cursor);
        }

        Ok(url.to_string())
    }

    /// `{source_base}/r/{subreddit}/{sort}/.rss?limit=N`
    fn feed_url(&self, sort: &str, limit: usize) -> Result<String, ScraperError> {
        let base_url = &self.config.source_base_url;
        let base = format!(
            "{}/r/{}/{sort}/.rss",
            base_url.trim_end_matches('/'),
            self.config.subreddit
        );
        let mut url = reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.min(REMOTE_PAGE_CAP).to_string());
        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
