//! Remote post fetching for fefe-interim.
//!
//! [`RedditClient`] reads a subreddit either through the paginated listing
//! JSON or through its syndication feed, and implements
//! [`interim_core::PostSource`] for the build controller.

pub mod client;
pub mod error;
mod feed;
mod parse;
mod rate_limit;
mod types;

pub use client::RedditClient;
pub use error::ScraperError;
