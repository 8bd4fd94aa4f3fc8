//! Remote cart seam.

use async_trait::async_trait;

use storefront_core::{ProductId, RemoteError};

use crate::entry::CartEntry;

/// The remote cart: single source of truth for the user's raw cart.
///
/// Every mutating call returns the full raw cart as the remote sees it after the
/// change. Implementations must not retry non-idempotent operations silently.
#[async_trait]
pub trait CartService: Send + Sync {
    /// `GET /cart`.
    async fn fetch_cart(&self) -> Result<Vec<CartEntry>, RemoteError>;

    /// Create an entry for a product that is not in the cart.
    async fn add_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartEntry>, RemoteError>;

    /// Change the quantity of an existing entry.
    async fn update_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartEntry>, RemoteError>;

    /// Delete an existing entry.
    async fn remove_item(&self, product_id: &ProductId) -> Result<Vec<CartEntry>, RemoteError>;
}
