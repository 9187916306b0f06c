//! Wire types for the Reddit listing and token endpoints.

use serde::{Deserialize, Deserializer};

/// OAuth token response. Reddit answers bad credentials with a 200 and an
/// `error` field, so `access_token` is optional here.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: Option<String>,
}

/// Listing envelope: `{"kind": "Listing", "data": {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    pub(crate) data: ListingData,
}

/// Children stay untyped so one malformed post cannot fail the whole page.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) children: Vec<serde_json::Value>,
    #[serde(default)]
    pub(crate) after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingChild {
    pub(crate) data: ListingPostData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingPostData {
    pub(crate) id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) selftext: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) score: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) num_comments: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) created_utc: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) permalink: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) link_flair_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) upvote_ratio: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) author: String,
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
