//! Presentation model of the cart (read-only or editable).

use std::collections::HashSet;

use serde::Serialize;

use storefront_core::{DomainResult, Money, ProductId};

use crate::entry::LineItem;
use crate::totals::{total_count, total_value};

pub const EMPTY_CART_MESSAGE: &str = "Cart is empty. Add more items to the cart to checkout.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Quantity controls and checkout action.
    Editable,
    /// Quantities only, plus the order details block (checkout page).
    ReadOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub cost: Money,
    pub quantity: u32,
    /// False in read-only mode and while a change to this line is pending.
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub mode: ViewMode,
    pub lines: Vec<LineView>,
    pub product_count: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CartView {
    pub fn new(
        items: &[LineItem],
        mode: ViewMode,
        pending: &HashSet<ProductId>,
    ) -> DomainResult<Self> {
        let lines = items
            .iter()
            .map(|item| LineView {
                product_id: item.product_id().clone(),
                name: item.name().to_string(),
                image: item.product().image().to_string(),
                cost: item.cost(),
                quantity: item.quantity(),
                editable: mode == ViewMode::Editable && !pending.contains(item.product_id()),
            })
            .collect();

        let subtotal = total_value(items)?;
        // Shipping is free.
        let shipping = Money::ZERO;

        Ok(Self {
            mode,
            lines,
            product_count: total_count(items),
            subtotal,
            shipping,
            total: subtotal,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Checkout is offered from the editable cart only.
    pub fn can_checkout(&self) -> bool {
        self.mode == ViewMode::Editable && !self.is_empty()
    }
}

impl core::fmt::Display for CartView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{EMPTY_CART_MESSAGE}");
        }

        for line in &self.lines {
            match self.mode {
                ViewMode::Editable => writeln!(
                    f,
                    "{:<40} [-] {} [+]  {}{}",
                    line.name,
                    line.quantity,
                    line.cost,
                    if line.editable { "" } else { "  (updating)" }
                )?,
                ViewMode::ReadOnly => {
                    writeln!(f, "{:<40} quantity: {}  {}", line.name, line.quantity, line.cost)?
                }
            }
        }
        writeln!(f, "Order total: {}", self.total)?;

        match self.mode {
            ViewMode::Editable => writeln!(f, "[Checkout]"),
            ViewMode::ReadOnly => {
                writeln!(f)?;
                writeln!(f, "Order Details")?;
                writeln!(f, "Products          {}", self.product_count)?;
                writeln!(f, "Subtotal          {}", self.subtotal)?;
                writeln!(f, "Shipping Charges  {}", self.shipping)?;
                writeln!(f, "Total             {}", self.total)
            }
        }
    }
}
