use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET must be set together (only {present} is set)")]
    IncompleteCredentials { present: String },
}
