//! Pre-flight checks for placing an order.

use serde::Serialize;
use thiserror::Error;

use storefront_core::{AddressId, DomainError, Money};

use crate::entry::LineItem;
use crate::totals::total_value;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("You must add items to cart first")]
    EmptyCart,

    #[error("Please select one shipping address to proceed.")]
    NoAddress,

    #[error("You do not have enough balance in your wallet for this purchase")]
    InsufficientBalance { required: Money, available: Money },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Body of `POST /cart/checkout`, built only after local validation passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    #[serde(rename = "addressId")]
    pub address_id: AddressId,
    #[serde(skip)]
    pub total: Money,
}

impl CheckoutRequest {
    /// Validate the cart for checkout: items, then address, then balance.
    ///
    /// `balance` is the wallet balance reported at login; when unknown the
    /// remote is left to decide.
    pub fn prepare(
        items: &[LineItem],
        address_id: Option<&AddressId>,
        balance: Option<Money>,
    ) -> Result<Self, CheckoutError> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let address_id = address_id.ok_or(CheckoutError::NoAddress)?;

        let total = total_value(items)?;
        if let Some(available) = balance {
            if available < total {
                return Err(CheckoutError::InsufficientBalance {
                    required: total,
                    available,
                });
            }
        }

        Ok(Self {
            address_id: address_id.clone(),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::CartEntry;
    use crate::reconcile::reconcile;
    use storefront_catalog::{Catalog, Product, Rating};
    use storefront_core::ProductId;

    fn items() -> Vec<LineItem> {
        let id = ProductId::new("p1").unwrap();
        let catalog = Catalog::new(vec![Product::new(
            id.clone(),
            "Laptop Sleeve",
            "Electronics",
            Money::from_minor(5000),
            Rating::new(4).unwrap(),
            "",
        )
        .unwrap()])
        .unwrap();
        reconcile(&[CartEntry::new(id, 2)], &catalog)
    }

    fn address() -> AddressId {
        AddressId::new("addr-1").unwrap()
    }

    #[test]
    fn valid_cart_produces_request() {
        let request =
            CheckoutRequest::prepare(&items(), Some(&address()), Some(Money::from_minor(10_000)))
                .unwrap();
        assert_eq!(request.total, Money::from_minor(10_000));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "addressId": "addr-1" })
        );
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert_eq!(
            CheckoutRequest::prepare(&[], Some(&address()), None),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn insufficient_balance_is_rejected() {
        let err = CheckoutRequest::prepare(&items(), Some(&address()), Some(Money::from_minor(9_999)))
            .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InsufficientBalance {
                required: Money::from_minor(10_000),
                available: Money::from_minor(9_999),
            }
        );
    }

    #[test]
    fn missing_address_is_rejected() {
        assert_eq!(
            CheckoutRequest::prepare(&items(), None, None),
            Err(CheckoutError::NoAddress)
        );
    }

    #[test]
    fn address_is_checked_before_balance() {
        assert_eq!(
            CheckoutRequest::prepare(&items(), None, Some(Money::ZERO)),
            Err(CheckoutError::NoAddress)
        );
        assert_eq!(
            CheckoutRequest::prepare(&[], None, Some(Money::ZERO)),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn unknown_balance_defers_to_remote() {
        assert!(CheckoutRequest::prepare(&items(), Some(&address()), None).is_ok());
    }
}
