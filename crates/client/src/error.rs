use thiserror::Error;

use storefront_auth::{LoginError, RegistrationError};
use storefront_core::{DomainError, RemoteError};

/// Failure of a client operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The API refused the request and said why (HTTP 400 `message`).
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Login(#[from] LoginError),
}

impl ClientError {
    /// Turn a 400 into the API's own explanation; keep everything else as is.
    pub(crate) fn from_rejection(err: RemoteError) -> Self {
        match err {
            RemoteError::Api(400, message) => ClientError::Rejected(message),
            other => ClientError::Remote(other),
        }
    }
}
