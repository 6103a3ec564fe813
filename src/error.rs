use thiserror::Error;

/// Errors surfaced by the client.
///
/// A body carrying a non-zero `errcode` is not an error here, check the
/// record's `is_ok()` instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // the url carries the app secret or a token in its query
        Self::Transport(Box::new(err.without_url()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
