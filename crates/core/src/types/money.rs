//! Non-negative monetary amounts using decimal arithmetic.
//!
//! Product prices and order shipping charges are both stored as `NUMERIC`
//! and must never be negative. [`Money`] enforces that at construction, so
//! aggregate arithmetic downstream only ever adds and scales valid amounts.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is below zero.
    #[error("amount cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount in the store currency's standard unit.
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use textile_hub_core::Money;
///
/// let price = Money::new(Decimal::new(1999, 2)).unwrap();
/// assert_eq!(price.to_string(), "19.99");
/// assert!(Money::new(Decimal::new(-1, 0)).is_err());
///
/// let total: Money = [price, price].into_iter().sum();
/// assert_eq!(total.amount(), Decimal::new(3998, 2));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create an amount from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This amount multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: usize) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative_amounts() {
        let err = Money::new(Decimal::new(-500, 2)).unwrap_err();
        assert_eq!(err, MoneyError::Negative(Decimal::new(-500, 2)));
        assert!(Money::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_times_scales_by_quantity() {
        let ten = Money::from_cents(1000);
        assert_eq!(ten.times(3).amount(), Decimal::new(30, 0));
        assert_eq!(ten.times(0), Money::ZERO);
    }

    #[test]
    fn test_display_uses_two_decimal_places() {
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_serde_round_trips_through_string_decimal() {
        let money = Money::from_cents(1250);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"12.50\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Money, _> = serde_json::from_str("\"-1.00\"");
        assert!(result.is_err());
    }
}
