use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Money, ProductId, ValueObject};

/// Aggregate rating out of five.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl ValueObject for Rating {}

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> DomainResult<Self> {
        if stars > Self::MAX {
            return Err(DomainError::validation(format!(
                "rating must be between 0 and {} (got {stars})",
                Self::MAX
            )));
        }
        Ok(Self(stars))
    }

    /// Parse a wire rating; it must be a whole number of stars.
    pub fn from_wire(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(DomainError::validation(format!(
                "rating must be an integer (got {value})"
            )));
        }
        if !(0.0..=f64::from(Self::MAX)).contains(&value) {
            return Err(DomainError::validation(format!(
                "rating must be between 0 and {} (got {value})",
                Self::MAX
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

/// Product as it appears on the wire (`GET /products`).
///
/// Numbers are kept loose here so that validation failures surface as
/// [`DomainError::Validation`] with a useful message instead of a serde error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub cost: f64,
    pub rating: f64,
    pub image: String,
}

/// Catalog entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    #[serde(rename = "_id")]
    id: ProductId,
    name: String,
    category: String,
    cost: Money,
    rating: Rating,
    image: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        cost: Money,
        rating: Rating,
        image: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {id}: name cannot be empty"
            )));
        }

        Ok(Self {
            id,
            name,
            category: category.into(),
            cost,
            rating,
            image: image.into(),
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Case-insensitive match on name or category.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = ProductId::new(record.id)?;
        let cost = Money::from_major(record.cost)
            .map_err(|e| DomainError::validation(format!("product {id}: cost: {e}")))?;
        let rating = Rating::from_wire(record.rating)
            .map_err(|e| DomainError::validation(format!("product {id}: {e}")))?;

        Product::new(id, record.name, record.category, cost, rating, record.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> serde_json::Value {
        json!({
            "_id": "BW0jAAeDJmlZCF8i",
            "name": "Tan Leatherette Weekender Duffle",
            "category": "Fashion",
            "cost": 150,
            "rating": 4,
            "image": "https://crio-directus-assets.s3.ap-south-1.amazonaws.com/ff071a1c.png"
        })
    }

    #[test]
    fn deserializes_valid_wire_product() {
        let product: Product = serde_json::from_value(record()).unwrap();
        assert_eq!(product.id().as_str(), "BW0jAAeDJmlZCF8i");
        assert_eq!(product.cost(), Money::from_minor(15_000));
        assert_eq!(product.rating().stars(), 4);
        assert_eq!(product.category(), "Fashion");
    }

    #[test]
    fn negative_cost_is_a_validation_error() {
        let mut raw = record();
        raw["cost"] = json!(-5);
        let record: ProductRecord = serde_json::from_value(raw).unwrap();
        let err = Product::try_from(record).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("cost") => {}
            other => panic!("expected cost validation error, got {other:?}"),
        }
    }

    #[test]
    fn fractional_rating_is_a_validation_error() {
        let mut raw = record();
        raw["rating"] = json!(3.5);
        let record: ProductRecord = serde_json::from_value(raw).unwrap();
        assert!(matches!(
            Product::try_from(record),
            Err(DomainError::Validation(msg)) if msg.contains("integer")
        ));
    }

    #[test]
    fn rating_above_five_is_rejected() {
        assert!(Rating::new(6).is_err());
        assert!(Rating::from_wire(6.0).is_err());
        assert!(Rating::from_wire(-1.0).is_err());
        assert_eq!(Rating::from_wire(0.0).unwrap().stars(), 0);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Product::new(
            ProductId::new("p1").unwrap(),
            "  ",
            "Fashion",
            Money::ZERO,
            Rating::new(3).unwrap(),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let product: Product = serde_json::from_value(record()).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["_id"], "BW0jAAeDJmlZCF8i");
        assert_eq!(value["cost"], 150.0);
    }

    #[test]
    fn matches_on_name_or_category_ignoring_case() {
        let product: Product = serde_json::from_value(record()).unwrap();
        assert!(product.matches("duffle"));
        assert!(product.matches("FASHION"));
        assert!(product.matches(""));
        assert!(!product.matches("kitchen"));
    }
}
