use std::future::Future;

use crate::post::Post;

/// Anything that can produce a newest-first list of posts for one build.
///
/// Implementations must not fail: remote errors are logged and fold into a
/// shorter (possibly empty) result.
pub trait PostSource {
    /// Fetches at most `limit` posts for the given sort order, newest-first.
    fn fetch_posts(&self, sort: &str, limit: usize) -> impl Future<Output = Vec<Post>> + Send;

    /// Label recorded in snapshots, e.g. `r/fefe_blog_interim`.
    fn label(&self) -> String;
}
