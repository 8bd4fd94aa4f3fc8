//! `storefront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, cart and
//! client crates (no HTTP, no storage).

pub mod error;
pub mod id;
pub mod money;
pub mod remote;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{AddressId, MutationId, ProductId};
pub use money::Money;
pub use remote::RemoteError;
pub use value_object::ValueObject;
