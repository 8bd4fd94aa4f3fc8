//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: `Money` and
/// `Rating` are value objects; a catalog `Product` is identified by its id.
///
/// ```ignore
/// let a = Money::from_minor(2000);
/// let b = Money::from_major(20.0)?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
