//! Cart domain module.
//!
//! Reconciliation and aggregation are pure functions over the raw cart reported
//! by the remote API and the session's [`Catalog`](storefront_catalog::Catalog).
//! The [`QuantityMutator`] is the only mutation path and always round-trips
//! through a [`CartService`] before re-reconciling.

pub mod checkout;
pub mod controller;
pub mod entry;
pub mod error;
pub mod in_memory;
pub mod mutator;
pub mod reconcile;
pub mod remote;
pub mod totals;
pub mod view;

pub use checkout::{CheckoutError, CheckoutRequest};
pub use controller::{CartController, MutationOutcome};
pub use entry::{CartEntry, LineItem};
pub use error::CartError;
pub use in_memory::{CartCall, InMemoryCartService};
pub use mutator::{CartTransition, QuantityMutator, decide};
pub use reconcile::reconcile;
pub use remote::CartService;
pub use totals::{total_count, total_value};
pub use view::{CartView, LineView, ViewMode};
