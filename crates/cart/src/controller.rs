//! Cart state for one mounted view.
//!
//! Holds the last raw cart reported by the remote and the line items derived
//! from it, refuses overlapping edits of the same product while its mutation is
//! in flight, and discards results that arrive after the view was torn down.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_catalog::Catalog;
use storefront_core::{DomainResult, ProductId};

use crate::entry::{CartEntry, LineItem};
use crate::error::CartError;
use crate::mutator::QuantityMutator;
use crate::reconcile::reconcile;
use crate::remote::CartService;
use crate::view::{CartView, ViewMode};

/// Result of a controller mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The remote accepted the change; these are the new line items.
    Applied(Vec<LineItem>),
    /// The view was torn down before the result arrived; nothing was applied.
    Discarded,
}

#[derive(Debug)]
struct ControllerState {
    catalog: Arc<Catalog>,
    /// Last raw cart reported by the remote.
    entries: Vec<CartEntry>,
    /// Always `reconcile(entries, catalog)`.
    items: Vec<LineItem>,
    pending: HashSet<ProductId>,
}

pub struct CartController<S: ?Sized> {
    mutator: QuantityMutator<S>,
    state: Mutex<ControllerState>,
    mounted: AtomicBool,
}

/// Clears the pending flag for a product when the mutation settles or is
/// dropped mid-flight.
struct PendingGuard<'a> {
    state: &'a Mutex<ControllerState>,
    product_id: ProductId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).pending.remove(&self.product_id);
    }
}

fn lock(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: CartService + ?Sized> CartController<S> {
    pub fn new(service: Arc<S>, catalog: Arc<Catalog>, entries: Vec<CartEntry>) -> Self {
        let items = reconcile(&entries, &catalog);
        Self {
            mutator: QuantityMutator::new(service),
            state: Mutex::new(ControllerState {
                catalog,
                entries,
                items,
                pending: HashSet::new(),
            }),
            mounted: AtomicBool::new(true),
        }
    }

    /// Fetch the remote cart and reconcile it against `catalog`.
    pub async fn load(service: Arc<S>, catalog: Arc<Catalog>) -> Result<Self, CartError> {
        let entries = service.fetch_cart().await?;
        tracing::debug!(entries = entries.len(), "cart loaded");
        Ok(Self::new(service, catalog, entries))
    }

    pub fn items(&self) -> Vec<LineItem> {
        lock(&self.state).items.clone()
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        lock(&self.state).catalog.clone()
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        lock(&self.state)
            .items
            .iter()
            .find(|i| i.product_id() == product_id)
            .map_or(0, LineItem::quantity)
    }

    /// False while a change to `product_id` is in flight or after teardown.
    pub fn is_editable(&self, product_id: &ProductId) -> bool {
        self.is_mounted() && !lock(&self.state).pending.contains(product_id)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn view(&self, mode: ViewMode) -> DomainResult<CartView> {
        let state = lock(&self.state);
        CartView::new(&state.items, mode, &state.pending)
    }

    /// Swap in a refreshed catalog and re-reconcile the last remote cart.
    ///
    /// Lines whose product left the catalog disappear and come back with their
    /// remote quantity once a later catalog lists the product again.
    pub fn replace_catalog(&self, catalog: Arc<Catalog>) {
        let mut state = lock(&self.state);
        state.items = reconcile(&state.entries, &catalog);
        state.catalog = catalog;
    }

    /// Mark the view as gone; in-flight results will be discarded.
    pub fn teardown(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    /// Set the quantity of `product_id`; zero or less removes it.
    pub async fn set_quantity(
        &self,
        product_id: &ProductId,
        new_quantity: i64,
    ) -> Result<MutationOutcome, CartError> {
        if !self.is_mounted() {
            return Ok(MutationOutcome::Discarded);
        }

        let (items, catalog) = {
            let mut state = lock(&self.state);
            if !state.pending.insert(product_id.clone()) {
                return Err(CartError::MutationPending(product_id.clone()));
            }
            (state.items.clone(), state.catalog.clone())
        };
        let _pending = PendingGuard {
            state: &self.state,
            product_id: product_id.clone(),
        };

        let result = self
            .mutator
            .apply(&items, &catalog, product_id, new_quantity)
            .await;

        if !self.is_mounted() {
            tracing::debug!(product_id = %product_id, "view torn down; discarding cart mutation result");
            return Ok(MutationOutcome::Discarded);
        }

        // The catalog may have been replaced while the call was in flight.
        let mut state = lock(&self.state);
        if let Some(entries) = result? {
            state.items = reconcile(&entries, &state.catalog);
            state.entries = entries;
        }
        Ok(MutationOutcome::Applied(state.items.clone()))
    }

    /// Catalog-card action: one more of `product_id` (adds it when absent).
    pub async fn add_to_cart(&self, product_id: &ProductId) -> Result<MutationOutcome, CartError> {
        self.step(product_id, 1).await
    }

    /// `+`/`-` controls: change the quantity by `delta`.
    pub async fn step(
        &self,
        product_id: &ProductId,
        delta: i64,
    ) -> Result<MutationOutcome, CartError> {
        let current = i64::from(self.quantity_of(product_id));
        self.set_quantity(product_id, current.saturating_add(delta)).await
    }
}
