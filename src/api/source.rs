use std::fmt;

use async_trait::async_trait;

use super::types::Joke;

/// Errors that can occur while talking to a joke API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the response body.
    Parse(String),
    /// The categories endpoint answered with an empty list.
    Empty,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Empty => write!(f, "no categories available"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Where jokes come from. The epics only see this trait, so tests can
/// swap in a scripted source.
#[async_trait]
pub trait JokeSource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Lists every category the source knows about.
    async fn categories(&self) -> Result<Vec<String>, ApiError>;

    /// Fetches one random joke from the given category.
    async fn random_joke(&self, category: &str) -> Result<Joke, ApiError>;
}
