use thiserror::Error;

use storefront_core::{DomainError, ProductId, RemoteError};

/// Failure of a cart operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Local programmer/validation error; nothing was sent to the remote.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The remote cart call failed; local state is unchanged.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Another mutation of the same product is still in flight.
    #[error("a change to product {0} is already in progress")]
    MutationPending(ProductId),
}
