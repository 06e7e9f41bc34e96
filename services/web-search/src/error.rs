//! Search error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors returned by a [`SearchBackend`](crate::backends::SearchBackend)
///
/// Callers that only want a well-formed result can fall back to the canonical
/// empty result with `unwrap_or_default()`.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The term was empty after trimming; no request was sent
    #[error("no search term supplied")]
    NoSearchTerm,

    /// The provider rejected the request as malformed. This means the
    /// configured key or engine id is wrong, not that the query is.
    #[error("invalid configuration")]
    InvalidConfiguration,

    #[error("response code was unexpected. was {0}")]
    UnexpectedStatus(u16),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// Whether retrying with the same configuration is pointless
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, SearchError::InvalidConfiguration)
    }

    /// The upstream HTTP status, when the error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::UnexpectedStatus(status) => Some(*status),
            SearchError::InvalidConfiguration => Some(400),
            SearchError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
