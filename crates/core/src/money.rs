//! Non-negative monetary amounts.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Largest major-unit amount accepted from the wire (keeps cents exact in f64).
const MAX_MAJOR: f64 = 1e13;

/// Amount in the smallest currency unit (cents).
///
/// The storefront is single-currency, so no currency code is carried. On the wire
/// amounts are JSON numbers in major units (`10`, `10.5`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(cents: u64) -> Self {
        Self(cents)
    }

    /// Convert a major-unit amount, rounding to the nearest cent.
    pub fn from_major(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("amount must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation(format!(
                "amount cannot be negative (got {amount})"
            )));
        }
        if amount > MAX_MAJOR {
            return Err(DomainError::validation(format!("amount {amount} is out of range")));
        }
        Ok(Self((amount * 100.0).round() as u64))
    }

    pub fn minor(self) -> u64 {
        self.0
    }

    pub fn as_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_mul(self, factor: u64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }
}

impl TryFrom<f64> for Money {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_major(value)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.as_major()
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let major = self.0 / 100;
        let cents = self.0 % 100;
        if cents == 0 {
            write!(f, "${major}")
        } else {
            write!(f, "${major}.{cents:02}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_amounts_round_to_cents() {
        assert_eq!(Money::from_major(10.0).unwrap().minor(), 1000);
        assert_eq!(Money::from_major(19.999).unwrap().minor(), 2000);
        assert_eq!(Money::from_major(0.1).unwrap().minor(), 10);
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        assert!(matches!(Money::from_major(-1.0), Err(DomainError::Validation(_))));
        assert!(Money::from_major(f64::NAN).is_err());
        assert!(Money::from_major(f64::INFINITY).is_err());
    }

    #[test]
    fn display_omits_zero_cents() {
        assert_eq!(Money::from_minor(2000).to_string(), "$20");
        assert_eq!(Money::from_minor(2050).to_string(), "$20.50");
        assert_eq!(Money::ZERO.to_string(), "$0");
    }

    #[test]
    fn wire_format_is_major_units() {
        let m: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(m, Money::from_minor(1250));
        assert_eq!(serde_json::to_string(&m).unwrap(), "12.5");
        assert!(serde_json::from_str::<Money>("-3").is_err());
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(Money::from_minor(u64::MAX).checked_add(Money::from_minor(1)), None);
        assert_eq!(Money::from_minor(u64::MAX).checked_mul(2), None);
        assert_eq!(Money::from_minor(250).checked_mul(4), Some(Money::from_minor(1000)));
    }
}
