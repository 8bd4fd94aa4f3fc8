//! Catalog store: the immutable product list for one session.

use std::collections::HashMap;

use storefront_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// Immutable, id-indexed snapshot of the products on sale.
///
/// Iteration follows the order the products were fetched in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id().clone(), position).is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate product id in catalog: {}",
                    product.id()
                )));
            }
        }

        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&position| &self.products[position])
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose name or category contains `text` (case-insensitive).
    pub fn search<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| p.matches(text))
    }
}
