//! Quantity mutation: the only path that changes the cart.

use std::sync::Arc;

use storefront_catalog::Catalog;
use storefront_core::{DomainError, DomainResult, MutationId, ProductId};

use crate::entry::{CartEntry, LineItem};
use crate::error::CartError;
use crate::reconcile::reconcile;
use crate::remote::CartService;

/// Transition of a single cart entry between ABSENT and PRESENT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartTransition {
    /// ABSENT, asked for zero or less: nothing to do.
    NoOp,
    /// ABSENT → PRESENT.
    Add { product_id: ProductId, quantity: u32 },
    /// PRESENT → PRESENT with a new quantity.
    Update { product_id: ProductId, quantity: u32 },
    /// PRESENT → ABSENT.
    Remove { product_id: ProductId },
}

/// Decide the transition for `product_id` given the displayed items.
///
/// Pure: performs no IO. The `Add` branch is re-checked against the remote
/// before it is executed (see [`QuantityMutator::set_quantity`]).
pub fn decide(
    current_items: &[LineItem],
    product_id: &ProductId,
    new_quantity: i64,
) -> DomainResult<CartTransition> {
    let present = current_items.iter().any(|i| i.product_id() == product_id);

    if new_quantity <= 0 {
        return Ok(if present {
            CartTransition::Remove {
                product_id: product_id.clone(),
            }
        } else {
            CartTransition::NoOp
        });
    }

    let quantity = u32::try_from(new_quantity).map_err(|_| {
        DomainError::validation(format!("quantity {new_quantity} is out of range"))
    })?;

    Ok(if present {
        CartTransition::Update {
            product_id: product_id.clone(),
            quantity,
        }
    } else {
        CartTransition::Add {
            product_id: product_id.clone(),
            quantity,
        }
    })
}

/// Applies quantity changes through the remote cart, then re-reconciles.
pub struct QuantityMutator<S: ?Sized> {
    service: Arc<S>,
}

impl<S: ?Sized> Clone for QuantityMutator<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S: CartService + ?Sized> QuantityMutator<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Set the cart quantity of `product_id` to `new_quantity`.
    ///
    /// Returns the freshly reconciled line items on success. On failure nothing
    /// is applied and `current_items` remains the caller's state.
    pub async fn set_quantity(
        &self,
        current_items: &[LineItem],
        catalog: &Catalog,
        product_id: &ProductId,
        new_quantity: i64,
    ) -> Result<Vec<LineItem>, CartError> {
        match self.apply(current_items, catalog, product_id, new_quantity).await? {
            Some(entries) => Ok(reconcile(&entries, catalog)),
            None => Ok(current_items.to_vec()),
        }
    }

    /// Run the transition against the remote and return the raw cart it
    /// reported, or `None` when nothing had to be sent.
    ///
    /// `catalog` only gates adds; reconciling the result is left to the caller.
    pub(crate) async fn apply(
        &self,
        current_items: &[LineItem],
        catalog: &Catalog,
        product_id: &ProductId,
        new_quantity: i64,
    ) -> Result<Option<Vec<CartEntry>>, CartError> {
        let mutation_id = MutationId::new();
        let mut transition = decide(current_items, product_id, new_quantity)?;

        if let CartTransition::Add { product_id, quantity } = transition.clone() {
            if !catalog.contains(&product_id) {
                return Err(DomainError::validation(format!(
                    "cannot add product {product_id}: not in catalog"
                ))
                .into());
            }
            transition = self.guard_add(mutation_id, &product_id, quantity).await?;
        }

        tracing::debug!(%mutation_id, ?transition, "applying cart transition");

        let entries = match &transition {
            CartTransition::NoOp => return Ok(None),
            CartTransition::Add { product_id, quantity } => {
                self.service.add_item(product_id, *quantity).await
            }
            CartTransition::Update { product_id, quantity } => {
                self.service.update_item(product_id, *quantity).await
            }
            CartTransition::Remove { product_id } => self.service.remove_item(product_id).await,
        }
        .inspect_err(|err| {
            tracing::warn!(%mutation_id, product_id = %product_id, error = %err, "cart mutation failed");
        })?;

        tracing::info!(%mutation_id, product_id = %product_id, quantity = new_quantity, "cart updated");
        Ok(Some(entries))
    }

    /// Re-read the remote cart before creating an entry; fall back to an update
    /// if the product already got there (concurrent add).
    async fn guard_add(
        &self,
        mutation_id: MutationId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartTransition, CartError> {
        let remote = self.service.fetch_cart().await?;
        let already_present = remote
            .iter()
            .any(|e| &e.product_id == product_id && e.quantity > 0);

        if already_present {
            tracing::debug!(%mutation_id, product_id = %product_id, "product already in remote cart; updating instead of adding");
            Ok(CartTransition::Update {
                product_id: product_id.clone(),
                quantity,
            })
        } else {
            Ok(CartTransition::Add {
                product_id: product_id.clone(),
                quantity,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::{CartCall, InMemoryCartService};
    use storefront_catalog::{Product, Rating};
    use storefront_core::{Money, RemoteError};

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn product(id: &str, cost_major: u64) -> Product {
        Product::new(
            pid(id),
            format!("Product {id}"),
            "Misc",
            Money::from_minor(cost_major * 100),
            Rating::new(4).unwrap(),
            "",
        )
        .unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![product("p1", 10), product("p2", 5), product("p3", 7)]).unwrap()
    }

    fn setup(entries: Vec<(&str, i64)>) -> (Arc<InMemoryCartService>, QuantityMutator<InMemoryCartService>, Vec<LineItem>) {
        let entries: Vec<CartEntry> = entries
            .into_iter()
            .map(|(id, q)| CartEntry::new(pid(id), q))
            .collect();
        let items = reconcile(&entries, &catalog());
        let service = Arc::new(InMemoryCartService::with_entries(entries));
        let mutator = QuantityMutator::new(service.clone());
        (service, mutator, items)
    }

    #[test]
    fn decide_covers_every_transition() {
        let (_, _, items) = setup(vec![("p1", 2)]);

        assert_eq!(
            decide(&items, &pid("p1"), 3).unwrap(),
            CartTransition::Update { product_id: pid("p1"), quantity: 3 }
        );
        assert_eq!(
            decide(&items, &pid("p1"), 0).unwrap(),
            CartTransition::Remove { product_id: pid("p1") }
        );
        assert_eq!(
            decide(&items, &pid("p3"), 1).unwrap(),
            CartTransition::Add { product_id: pid("p3"), quantity: 1 }
        );
        assert_eq!(decide(&items, &pid("p3"), -1).unwrap(), CartTransition::NoOp);
        assert!(matches!(
            decide(&items, &pid("p1"), i64::from(u32::MAX) + 1),
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn updating_an_existing_entry_issues_exactly_one_update() {
        let (service, mutator, items) = setup(vec![("p1", 2)]);

        let updated = mutator.set_quantity(&items, &catalog(), &pid("p1"), 3).await.unwrap();

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].quantity(), 3);
        assert_eq!(service.calls(), vec![CartCall::Update(pid("p1"), 3)]);
    }

    #[tokio::test]
    async fn adding_an_absent_product_creates_one_entry() {
        let (service, mutator, items) = setup(vec![("p1", 2)]);

        let updated = mutator.set_quantity(&items, &catalog(), &pid("p3"), 1).await.unwrap();

        assert_eq!(service.mutation_calls(), vec![CartCall::Add(pid("p3"), 1)]);
        let p3: Vec<&LineItem> = updated.iter().filter(|i| i.product_id() == &pid("p3")).collect();
        assert_eq!(p3.len(), 1);
        assert_eq!(p3[0].quantity(), 1);
        // Remote order: existing entry first, new one appended.
        assert_eq!(updated[0].product_id(), &pid("p1"));
    }

    #[tokio::test]
    async fn zero_quantity_removes_a_present_entry() {
        let (service, mutator, items) = setup(vec![("p1", 2), ("p2", 1)]);

        let updated = mutator.set_quantity(&items, &catalog(), &pid("p1"), 0).await.unwrap();

        assert_eq!(service.calls(), vec![CartCall::Remove(pid("p1"))]);
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].product_id(), &pid("p2"));
    }

    #[tokio::test]
    async fn removing_an_absent_product_is_a_no_op() {
        let (service, mutator, items) = setup(vec![("p1", 2)]);

        let updated = mutator.set_quantity(&items, &catalog(), &pid("p2"), 0).await.unwrap();

        assert!(service.calls().is_empty());
        assert_eq!(updated, items);
    }

    #[tokio::test]
    async fn setting_the_same_quantity_twice_leaves_one_entry() {
        let (service, mutator, items) = setup(vec![]);

        let once = mutator.set_quantity(&items, &catalog(), &pid("p2"), 4).await.unwrap();
        let twice = mutator.set_quantity(&once, &catalog(), &pid("p2"), 4).await.unwrap();

        assert_eq!(twice.len(), 1);
        assert_eq!(twice[0].quantity(), 4);
        let remote = service.entries();
        assert_eq!(remote, vec![CartEntry::new(pid("p2"), 4)]);
    }

    #[tokio::test]
    async fn concurrent_add_falls_back_to_update() {
        let (service, mutator, items) = setup(vec![]);
        // Another tab added p3 after our items were reconciled.
        service.put_entry(pid("p3"), 1);

        let updated = mutator.set_quantity(&items, &catalog(), &pid("p3"), 2).await.unwrap();

        assert_eq!(
            service.calls(),
            vec![CartCall::Fetch, CartCall::Update(pid("p3"), 2)]
        );
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].quantity(), 2);
        assert_eq!(service.entries().len(), 1);
    }

    #[tokio::test]
    async fn remote_failure_is_surfaced_and_nothing_is_applied() {
        let (service, mutator, items) = setup(vec![("p1", 2)]);
        service.fail_next(RemoteError::Api(500, "boom".into()));

        let err = mutator
            .set_quantity(&items, &catalog(), &pid("p1"), 5)
            .await
            .unwrap_err();

        assert_eq!(err, CartError::Remote(RemoteError::Api(500, "boom".into())));
        assert_eq!(service.entries(), vec![CartEntry::new(pid("p1"), 2)]);
    }

    #[tokio::test]
    async fn guest_cart_fails_gracefully() {
        let service = Arc::new(InMemoryCartService::guest());
        let mutator = QuantityMutator::new(service);

        let err = mutator
            .set_quantity(&[], &catalog(), &pid("p1"), 1)
            .await
            .unwrap_err();

        assert_eq!(err, CartError::Remote(RemoteError::Unauthenticated));
    }

    #[tokio::test]
    async fn adding_a_product_missing_from_the_catalog_is_rejected_locally() {
        let (service, mutator, items) = setup(vec![]);

        let err = mutator
            .set_quantity(&items, &catalog(), &pid("gone"), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, CartError::Domain(DomainError::Validation(_))));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn result_is_reconciled_against_the_supplied_catalog() {
        // The remote still holds an entry for a product that is no longer sold.
        let (service, mutator, items) = setup(vec![("p1", 1)]);
        service.put_entry(pid("retired"), 3);

        let updated = mutator.set_quantity(&items, &catalog(), &pid("p1"), 2).await.unwrap();

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].product_id(), &pid("p1"));
    }
}
