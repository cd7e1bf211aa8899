// Error types for the Wikipedia client. These never reach the menu: the
// public `ArticleSource` methods log them and fall back to "not found".

use thiserror::Error;

/// Why a single API call failed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout and similar.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The body was not valid JSON or did not match the expected structure.
    #[error("could not parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Valid JSON, but a field we rely on was missing.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl FetchError {
    /// True for failures that happened before a usable response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Status(_))
    }
}
