//! Shared domain types for fefe-interim.
//!
//! Holds the [`Post`] record and its derived-field helpers, the persisted
//! [`Snapshot`] shape, the [`PostSource`] seam used by the build controller,
//! and environment-driven configuration.

pub mod app_config;
pub mod config;
pub mod error;
pub mod links;
pub mod post;
pub mod snapshot;
pub mod source;

pub use app_config::{AppConfig, Credentials, FetchConfig, FetchMode, FilterConfig, SiteConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use links::{external_links, full_source_url, source_domain};
pub use post::{Post, RawPost};
pub use snapshot::Snapshot;
pub use source::PostSource;
