//! Monetary amounts in integer cents.
//!
//! The commerce API transmits amounts as decimal strings ("19.99"). All
//! arithmetic here happens on integer cents, with round-half-up applied at
//! the single place a fractional intermediate arises (percentage tax).
//! Formatting back to a display string happens only at the template
//! boundary, so repeated float arithmetic can never drift totals.

use core::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Money`] amount.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MoneyParseError {
    /// The input is not a decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// The amount does not fit in 64-bit cents.
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// A monetary amount in USD, stored as integer cents.
///
/// ## Examples
///
/// ```
/// use sundrift_core::Money;
///
/// let price = Money::from_cents(15_99);
/// assert_eq!(price.to_string(), "$15.99");
///
/// let parsed: Money = "120.00".parse().unwrap();
/// assert_eq!(parsed.cents(), 12_000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(0);

    /// Create a `Money` from integer cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in integer cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal amount string (e.g., `"19.99"`).
    ///
    /// Sub-cent precision is rounded half-up to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number or the cent
    /// amount overflows `i64`.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|_| MoneyParseError::InvalidAmount(s.to_owned()))?;
        let cents = (decimal * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        cents
            .to_i64()
            .map(Self)
            .ok_or_else(|| MoneyParseError::OutOfRange(s.to_owned()))
    }

    /// Add two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Take a whole-number percentage of the amount, rounded half-up.
    ///
    /// Used for tax: `Money::from_cents(6_000).percent(8)` is `$4.80`.
    #[must_use]
    pub const fn percent(self, percent: u32) -> Self {
        let scaled = self.0.saturating_mul(percent as i64);
        // Round half away from zero on the final division by 100
        let half = if scaled >= 0 { 50 } else { -50 };
        Self((scaled + half) / 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_strings() {
        assert_eq!(Money::parse("19.99").unwrap().cents(), 1_999);
        assert_eq!(Money::parse("120").unwrap().cents(), 12_000);
        assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse(" 60.00 ").unwrap().cents(), 6_000);
    }

    #[test]
    fn test_parse_rounds_sub_cent_half_up() {
        assert_eq!(Money::parse("1.005").unwrap().cents(), 101);
        assert_eq!(Money::parse("1.004").unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Money::parse("abc"),
            Err(MoneyParseError::InvalidAmount(_))
        ));
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(15_99).to_string(), "$15.99");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(12_000).to_string(), "$120.00");
        assert_eq!(Money::from_cents(-2_50).to_string(), "-$2.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 8% of $60.00 = $4.80 exactly
        assert_eq!(Money::from_cents(6_000).percent(8), Money::from_cents(480));
        // 8% of $0.06 = 0.48 cents, rounds to 0 cents... half-up boundary:
        // 8% of $0.07 = 0.56 cents -> 1 cent
        assert_eq!(Money::from_cents(6).percent(8), Money::from_cents(0));
        assert_eq!(Money::from_cents(7).percent(8), Money::from_cents(1));
        // Exact half rounds up: 8% of 62.5 cents = 5.0 -> handled exactly;
        // 50% of 1 cent = 0.5 cents -> 1 cent
        assert_eq!(Money::from_cents(1).percent(50), Money::from_cents(1));
    }

    #[test]
    fn test_sum_and_mul() {
        let lines = [Money::from_cents(1_000), Money::from_cents(2_500)];
        let total: Money = lines.into_iter().sum();
        assert_eq!(total, Money::from_cents(3_500));
        assert_eq!(
            Money::from_cents(1_999).saturating_mul(3),
            Money::from_cents(5_997)
        );
    }

    #[test]
    fn test_serde_is_transparent_cents() {
        let json = serde_json::to_string(&Money::from_cents(1_599)).unwrap();
        assert_eq!(json, "1599");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_cents(1_599));
    }
}
