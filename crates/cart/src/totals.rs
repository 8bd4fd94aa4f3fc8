//! Cart totals.

use storefront_core::{DomainError, DomainResult, Money};

use crate::entry::LineItem;

/// Sum of `cost * quantity` over `items`.
///
/// Overflow is reported as a validation error rather than wrapping.
pub fn total_value(items: &[LineItem]) -> DomainResult<Money> {
    items.iter().try_fold(Money::ZERO, |total, item| {
        item.line_total()
            .and_then(|line| total.checked_add(line))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "cart total overflows at product {}",
                    item.product_id()
                ))
            })
    })
}

/// Sum of quantities over `items`.
pub fn total_count(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity())).sum()
}
