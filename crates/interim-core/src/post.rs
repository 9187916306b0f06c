use serde::{Deserialize, Serialize};

use crate::links::{external_links, full_source_url, source_domain};

/// Fields of one post as read from the source, before derived fields exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPost {
    pub id: String,
    pub title: String,
    /// Markdown-like self text.
    pub body: String,
    pub score: i64,
    pub num_comments: i64,
    /// Seconds since the Unix epoch.
    pub created_utc: f64,
    /// Path relative to the source base URL, e.g. `/r/x/comments/abc/title/`.
    pub permalink: String,
    /// Link target; equals the discussion URL for self posts.
    pub url: String,
    pub flair: Option<String>,
    pub upvote_ratio: f64,
    pub author: String,
}

impl RawPost {
    /// Builds the immutable [`Post`], computing derived fields against
    /// `base_url` (the source's public base URL).
    #[must_use]
    pub fn into_post(self, base_url: &str) -> Post {
        let reddit_url = full_source_url(&self.permalink, base_url);
        let external_links = external_links(&self.body, &source_domain(base_url));
        Post {
            id: self.id,
            title: self.title,
            body: self.body,
            score: self.score,
            num_comments: self.num_comments,
            created_utc: self.created_utc,
            permalink: self.permalink,
            reddit_url,
            url: self.url,
            flair: self.flair.filter(|f| !f.is_empty()),
            upvote_ratio: self.upvote_ratio,
            author: self.author,
            external_links,
        }
    }
}

/// A single mirrored forum post.
///
/// Constructed once per fetch via [`RawPost::into_post`] and never mutated
/// afterwards. The serialized form is the snapshot/renderer contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub score: i64,
    pub num_comments: i64,
    pub created_utc: f64,
    pub permalink: String,
    pub reddit_url: String,
    pub url: String,
    #[serde(default)]
    pub flair: Option<String>,
    pub upvote_ratio: f64,
    pub author: String,
    #[serde(default)]
    pub external_links: Vec<String>,
}

impl Post {
    /// Sorts newest-first by creation timestamp.
    pub fn sort_newest_first(posts: &mut [Post]) {
        posts.sort_by(|a, b| b.created_utc.total_cmp(&a.created_utc));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, created_utc: f64) -> RawPost {
        RawPost {
            id: id.to_owned(),
            title: "Titel".to_owned(),
            body: "Quelle: [heise](https://heise.de/x) https://www.reddit.com/r/y".to_owned(),
            score: 12,
            num_comments: 4,
            created_utc,
            permalink: format!("/r/fefe_blog_interim/comments/{id}/titel/"),
            url: "https://heise.de/x".to_owned(),
            flair: Some("Security".to_owned()),
            upvote_ratio: 0.9,
            author: "someone".to_owned(),
        }
    }

    #[test]
    fn into_post_computes_derived_fields() {
        let post = raw("abc", 1.0).into_post("https://www.reddit.com");
        assert_eq!(
            post.reddit_url,
            "https://www.reddit.com/r/fefe_blog_interim/comments/abc/titel/"
        );
        assert_eq!(post.external_links, vec!["https://heise.de/x".to_owned()]);
        assert_eq!(post.flair.as_deref(), Some("Security"));
    }

    #[test]
    fn empty_flair_becomes_none() {
        let mut r = raw("abc", 1.0);
        r.flair = Some(String::new());
        assert!(r.into_post("https://www.reddit.com").flair.is_none());
    }

    #[test]
    fn serialized_post_has_renderer_fields() {
        let post = raw("abc", 1.5).into_post("https://www.reddit.com");
        let value = serde_json::to_value(&post).unwrap();
        for key in [
            "id",
            "title",
            "body",
            "score",
            "num_comments",
            "created_utc",
            "permalink",
            "reddit_url",
            "url",
            "flair",
            "upvote_ratio",
            "author",
            "external_links",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn deserialize_tolerates_missing_derived_fields() {
        let json = r#"{
            "id": "x", "title": "", "body": "", "score": 1, "num_comments": 0,
            "created_utc": 10.0, "permalink": "/r/a/comments/x/", "reddit_url": "",
            "url": "", "upvote_ratio": 1.0, "author": "a"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.flair.is_none());
        assert!(post.external_links.is_empty());
    }

    #[test]
    fn sort_newest_first_orders_by_timestamp_descending() {
        let base = "https://www.reddit.com";
        let mut posts = vec![
            raw("old", 10.0).into_post(base),
            raw("new", 30.0).into_post(base),
            raw("mid", 20.0).into_post(base),
        ];
        Post::sort_newest_first(&mut posts);
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }
}
