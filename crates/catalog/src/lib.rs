//! Catalog domain module.
//!
//! Products are fetched once per session and never mutated client-side. This
//! crate validates them on the way in and serves id lookups to the cart.

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::{Product, ProductRecord, Rating};
