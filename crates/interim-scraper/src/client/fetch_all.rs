//! Multi-page fetch loops for `RedditClient` and its `PostSource` impl.

use std::time::Duration;

use interim_core::{FetchMode, Post, PostSource, RawPost};

use crate::feed::{entry_to_raw_post, parse_feed};
use crate::parse::parse_listing_child;

use super::{RedditClient, MAX_PAGES, REMOTE_PAGE_CAP};

impl RedditClient {
    /// Fetches up to `limit` posts from the paginated listing, following
    /// `after` cursors.
    ///
    /// **Best-effort semantics**: a failed page ends pagination and the posts
    /// collected so far are returned. Records that fail to parse are logged
    /// and skipped. The result is newest-first.
    pub async fn fetch_listing(&self, sort: &str, limit: usize) -> Vec<Post> {
        if limit == 0 {
            return Vec::new();
        }

        let session = self.open_session().await;
        let page_size = self.config.page_size.clamp(1, REMOTE_PAGE_CAP);
        let mut raw_posts: Vec<RawPost> = Vec::new();
        let mut after: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                tracing::warn!(max_pages = MAX_PAGES, "page limit reached, stopping pagination");
                break;
            }

            let page_limit = page_size.min(limit - raw_posts.len());
            let listing = match self
                .fetch_listing_page(&session, sort, page_limit, after.as_deref())
                .await
            {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::warn!(
                        page = page_count,
                        collected = raw_posts.len(),
                        error = %e,
                        "listing page failed, keeping posts fetched so far"
                    );
                    break;
                }
            };

            if listing.data.children.is_empty() {
                break;
            }

            for child in &listing.data.children {
                match parse_listing_child(child) {
                    Ok(raw) => raw_posts.push(raw),
                    Err(e) => tracing::warn!(error = %e, "skipping malformed listing record"),
                }
            }

            after = listing.data.after.filter(|cursor| !cursor.is_empty());
            if after.is_none() || raw_posts.len() >= limit {
                break;
            }

            if self.config.inter_page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.inter_page_delay_ms)).await;
            }
        }

        raw_posts.truncate(limit);
        let posts = self.finish(raw_posts);
        tracing::info!(
            count = posts.len(),
            pages = page_count.min(MAX_PAGES),
            sort,
            "fetched listing posts"
        );
        posts
    }

    /// Fetches a single feed document (at most 100 entries). Feed posts
    /// carry no vote data.
    pub async fn fetch_feed(&self, sort: &str, limit: usize) -> Vec<Post> {
        if limit == 0 {
            return Vec::new();
        }

        let document = match self.fetch_feed_document(sort, limit).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(error = %e, "feed request failed");
                return Vec::new();
            }
        };

        let entries = match parse_feed(&document) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "feed document did not parse");
                return Vec::new();
            }
        };

        let mut raw_posts = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry_to_raw_post(entry, &self.config.source_base_url) {
                Ok(raw) => raw_posts.push(raw),
                Err(e) => tracing::warn!(error = %e, "skipping malformed feed entry"),
            }
        }

        raw_posts.truncate(limit);
        let posts = self.finish(raw_posts);
        tracing::info!(count = posts.len(), sort, "fetched feed posts");
        posts
    }

    fn finish(&self, raw_posts: Vec<RawPost>) -> Vec<Post> {
        let mut posts: Vec<Post> = raw_posts
            .into_iter()
            .map(|raw| raw.into_post(&self.config.source_base_url))
            .collect();
        Post::sort_newest_first(&mut posts);
        posts
    }
}

impl PostSource for RedditClient {
    async fn fetch_posts(&self, sort: &str, limit: usize) -> Vec<Post> {
        match self.config.mode {
            FetchMode::Listing => self.fetch_listing(sort, limit).await,
            FetchMode::Feed => self.fetch_feed(sort, limit).await,
        }
    }

    fn label(&self) -> String {
        format!("r/{}", self.config.subreddit)
    }
}
