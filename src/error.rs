//! Errors raised while talking to the content API

use thiserror::Error;

/// Failure of a single request against the content repository
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("content API answered {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to decode content API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("content API exposes no master ref")]
    MissingMasterRef,

    #[error("refusing to follow cursor outside the content API: {0}")]
    ForeignCursor(String),
}

impl ContentError {
    /// Whether the error came from the caller rather than the content API
    pub fn is_bad_request(&self) -> bool {
        matches!(self, ContentError::ForeignCursor(_) | ContentError::Url(_))
    }
}
