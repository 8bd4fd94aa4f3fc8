use serde::{Deserialize, Serialize};

use storefront_catalog::Product;
use storefront_core::{Money, ProductId};

/// Raw cart entry as reported by the remote cart (`GET /cart`).
///
/// The quantity is kept signed: the remote must only report positive
/// quantities, but the reconciler is the one place that decides what to do when
/// it does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub quantity: i64,
}

impl CartEntry {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Render-ready cart line: the product's fields plus the quantity in the cart.
///
/// Only produced by reconciliation, so `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    #[serde(flatten)]
    product: Product,
    quantity: u32,
}

impl LineItem {
    pub(crate) fn new(product: Product, quantity: u32) -> Self {
        debug_assert!(quantity >= 1);
        Self { product, quantity }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> &ProductId {
        self.product.id()
    }

    pub fn name(&self) -> &str {
        self.product.name()
    }

    pub fn cost(&self) -> Money {
        self.product.cost()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `cost * quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.cost().checked_mul(u64::from(self.quantity))
    }
}
