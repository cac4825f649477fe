//! REST error types

use thiserror::Error;

/// Errors returned by [`RestClient`](crate::RestClient)
#[derive(Debug, Error)]
pub enum RestError {
    /// Request could not be sent or the response body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("API returned {status} {reason}")]
    Status { status: u16, reason: String },

    /// The configured base URL is not an http(s) URL
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl RestError {
    /// HTTP status of the failed call, if the API answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// REST result type
pub type RestResult<T> = Result<T, RestError>;
