//! Join of the raw remote cart against the catalog.

use std::collections::HashMap;

use storefront_catalog::Catalog;
use storefront_core::ProductId;

use crate::entry::{CartEntry, LineItem};

/// Produce the line items for `entries`, in entry order.
///
/// - Entries whose product is not in `catalog` are dropped (the product is no
///   longer sold).
/// - Entries with a non-positive quantity are dropped; the remote must not
///   report them.
/// - If a product appears more than once, only its **last** entry is kept, at
///   the position of that last entry.
pub fn reconcile(entries: &[CartEntry], catalog: &Catalog) -> Vec<LineItem> {
    let mut last_position: HashMap<&ProductId, usize> = HashMap::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        if last_position.insert(&entry.product_id, position).is_some() {
            tracing::warn!(product_id = %entry.product_id, "duplicate cart entry; keeping the last one");
        }
    }

    let mut items = Vec::with_capacity(last_position.len());
    for (position, entry) in entries.iter().enumerate() {
        if last_position.get(&entry.product_id) != Some(&position) {
            continue;
        }

        if entry.quantity <= 0 {
            tracing::warn!(
                product_id = %entry.product_id,
                quantity = entry.quantity,
                "cart entry with non-positive quantity; treating as absent"
            );
            continue;
        }
        let Ok(quantity) = u32::try_from(entry.quantity) else {
            tracing::warn!(
                product_id = %entry.product_id,
                quantity = entry.quantity,
                "cart entry quantity out of range; dropping"
            );
            continue;
        };

        match catalog.get(&entry.product_id) {
            Some(product) => items.push(LineItem::new(product.clone(), quantity)),
            None => {
                tracing::debug!(product_id = %entry.product_id, "cart entry references unknown product; omitted");
            }
        }
    }

    items
}
