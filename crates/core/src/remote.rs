//! Failures of remote collaborators (catalog and cart APIs).
//!
//! Transport-agnostic: the HTTP client maps its own errors into these, and
//! in-memory fakes produce them directly.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// No bearer credential is available (guest mode).
    #[error("not logged in; cart changes require an authenticated session")]
    Unauthenticated,

    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response.
    #[error("API error ({0}): {1}")]
    Api(u16, String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::Network(_) => true,
            RemoteError::Api(status, _) => *status >= 500,
            RemoteError::Unauthenticated | RemoteError::Malformed(_) => false,
        }
    }
}
