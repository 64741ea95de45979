//! Type-safe price representation in minor currency units.
//!
//! The remote store quotes every price as a whole number of minor currency
//! units (tenge), so `Price` wraps an `i64` rather than a decimal type.
//! Line totals are computed with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Currency suffix used for display.
pub const CURRENCY_SUFFIX: &str = "₸";

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    /// Prices are non-negative by contract with the remote store.
    #[error("price cannot be negative: {0}")]
    Negative(i64),
}

/// A price in minor currency units.
///
/// Serializes transparently as the bare integer the store API uses
/// (`"price": 500` means 500 ₸).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from minor units, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `minor` is below zero.
    pub const fn from_minor(minor: i64) -> Result<Self, PriceError> {
        if minor < 0 {
            return Err(PriceError::Negative(minor));
        }
        Ok(Self(minor))
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn as_minor(&self) -> i64 {
        self.0
    }

    /// Line total for `quantity` units, `None` on overflow.
    #[must_use]
    pub const fn line_total(&self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as i64) {
            Some(total) => Some(Self(total)),
            None => None,
        }
    }

    /// Sum of two prices, `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SUFFIX}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_rejects_negative() {
        assert_eq!(Price::from_minor(-1), Err(PriceError::Negative(-1)));
        assert!(Price::from_minor(0).is_ok());
    }

    #[test]
    fn test_line_total_exact() {
        let unit = Price::from_minor(500).expect("valid price");
        assert_eq!(unit.line_total(1), Some(Price::from_minor(500).expect("valid")));
        assert_eq!(unit.line_total(2), Some(Price::from_minor(1000).expect("valid")));
    }

    #[test]
    fn test_line_total_overflow() {
        let unit = Price::from_minor(i64::MAX).expect("valid price");
        assert_eq!(unit.line_total(2), None);
    }

    #[test]
    fn test_display_uses_currency_suffix() {
        let price = Price::from_minor(500).expect("valid price");
        assert_eq!(price.to_string(), "500 ₸");
    }

    #[test]
    fn test_serde_transparent() {
        let price: Price = serde_json::from_str("500").expect("deserialize");
        assert_eq!(price.as_minor(), 500);
        assert_eq!(serde_json::to_string(&price).expect("serialize"), "500");
    }
}
