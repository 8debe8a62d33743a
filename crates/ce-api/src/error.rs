//! Error types for country data sources

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Broad category of a [`SourceError`], as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Parse,
    NotFound,
}

/// Errors returned by a [`CountrySource`](crate::CountrySource)
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure: connection, timeout, TLS, body read
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: StatusCode },

    /// The response body is not the expected shape
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// No country matches the requested name
    #[error("country '{name}' not found")]
    NotFound { name: String },
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::Fetch { .. } | SourceError::Status { .. } => ErrorKind::Fetch,
            SourceError::Parse { .. } => ErrorKind::Parse,
            SourceError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
