//! Type-safe price representation.
//!
//! All storefront amounts are whole Indonesian rupiah (IDR has no minor unit
//! in practice), so a price is an unsigned integer count of rupiah. Integer
//! arithmetic keeps `total == subtotal + shipping` exact; overflow is
//! reported instead of wrapping.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when price arithmetic would exceed `u64::MAX` rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("price arithmetic overflowed")]
pub struct PriceOverflow;

/// An amount of money in whole rupiah.
///
/// Serializes as a bare JSON number, matching the stored order history.
///
/// ```
/// use buraq_core::Price;
///
/// let line = Price::new(10_000).checked_mul(2).unwrap();
/// assert_eq!(line, Price::new(20_000));
/// assert_eq!(line.to_string(), "Rp20.000");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero rupiah.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-rupiah amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The amount in whole rupiah.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Whether this is a zero amount.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add two prices.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the sum does not fit.
    pub const fn checked_add(self, other: Self) -> Result<Self, PriceOverflow> {
        match self.0.checked_add(other.0) {
            Some(sum) => Ok(Self(sum)),
            None => Err(PriceOverflow),
        }
    }

    /// Multiply a unit price by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the product does not fit.
    pub fn checked_mul(self, quantity: u32) -> Result<Self, PriceOverflow> {
        self.0
            .checked_mul(u64::from(quantity))
            .map(Self)
            .ok_or(PriceOverflow)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    /// Formats as rupiah with `.` thousands separators, e.g. `Rp1.250.000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "Rp{grouped}")
    }
}
