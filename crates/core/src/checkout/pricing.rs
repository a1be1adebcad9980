//! Order pricing: subtotal, shipping, tax, and cash-on-delivery surcharge.
//!
//! All amounts are integer cents ([`Money`]); the only fractional step is
//! the percentage tax, which rounds half-up inside [`Money::percent`].

use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Orders above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(100_00);

/// Flat shipping rate below the free-shipping threshold.
pub const FLAT_SHIPPING_RATE: Money = Money::from_cents(15_99);

/// Sales tax rate applied to the subtotal, in whole percent.
pub const TAX_RATE_PERCENT: u32 = 8;

/// Fixed surcharge for cash-on-delivery orders.
pub const COD_FEE: Money = Money::from_cents(2_99);

/// How the customer pays for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Credit or debit card; the only method that validates card fields.
    #[default]
    Card,
    Paypal,
    ApplePay,
    /// Cash on delivery; adds [`COD_FEE`] to the grand total.
    Cod,
}

impl PaymentMethod {
    /// Parse the form value posted by the payment step.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "card" => Some(Self::Card),
            "paypal" => Some(Self::Paypal),
            "apple-pay" => Some(Self::ApplePay),
            "cod" => Some(Self::Cod),
            _ => None,
        }
    }

    /// Stable identifier used in forms and the order payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::ApplePay => "apple-pay",
            Self::Cod => "cod",
        }
    }

    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit / Debit Card",
            Self::Paypal => "PayPal",
            Self::ApplePay => "Apple Pay",
            Self::Cod => "Cash on Delivery",
        }
    }
}

/// A priced cart line as the calculator sees it: unit price and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(unit_price: Money, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }

    /// Extended price for the line.
    #[must_use]
    pub const fn line_total(self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// The derived order totals.
///
/// Invariant: `total = subtotal + shipping + tax`, and
/// `grand_total = total + cod_fee` where `cod_fee` is nonzero only for
/// cash-on-delivery orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub cod_fee: Money,
    /// Subtotal + shipping + tax, before any surcharge.
    pub total: Money,
    /// What the customer actually pays.
    pub grand_total: Money,
}

/// Shipping cost for a given subtotal.
#[must_use]
pub fn shipping_for(subtotal: Money) -> Money {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Money::ZERO
    } else {
        FLAT_SHIPPING_RATE
    }
}

/// Derive order totals from cart lines and the selected payment method.
///
/// Zero-quantity lines contribute nothing; quantities are unsigned so
/// negative input cannot reach the calculator.
#[must_use]
pub fn quote(lines: &[LineItem], method: PaymentMethod) -> Totals {
    let subtotal: Money = lines.iter().map(|line| line.line_total()).sum();
    let shipping = shipping_for(subtotal);
    let tax = subtotal.percent(TAX_RATE_PERCENT);
    let total = subtotal.saturating_add(shipping).saturating_add(tax);
    let cod_fee = if method == PaymentMethod::Cod {
        COD_FEE
    } else {
        Money::ZERO
    };

    Totals {
        subtotal,
        shipping,
        tax,
        cod_fee,
        total,
        grand_total: total.saturating_add(cod_fee),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(cents: i64, quantity: u32) -> LineItem {
        LineItem::new(Money::from_cents(cents), quantity)
    }

    #[test]
    fn test_shipping_free_above_threshold() {
        assert_eq!(shipping_for(Money::from_cents(10_001)), Money::ZERO);
        assert_eq!(shipping_for(Money::from_cents(50_000)), Money::ZERO);
    }

    #[test]
    fn test_shipping_flat_at_or_below_threshold() {
        // Exactly $100.00 is NOT free: the rule is strictly greater-than
        assert_eq!(shipping_for(Money::from_cents(10_000)), FLAT_SHIPPING_RATE);
        assert_eq!(shipping_for(Money::from_cents(1)), FLAT_SHIPPING_RATE);
        assert_eq!(shipping_for(Money::ZERO), FLAT_SHIPPING_RATE);
    }

    #[test]
    fn test_quote_card_sixty_dollar_cart() {
        // $60 x 1, card: subtotal 60.00, shipping 15.99, tax 4.80, total 80.79
        let totals = quote(&[line(6_000, 1)], PaymentMethod::Card);
        assert_eq!(totals.subtotal, Money::from_cents(6_000));
        assert_eq!(totals.shipping, Money::from_cents(1_599));
        assert_eq!(totals.tax, Money::from_cents(480));
        assert_eq!(totals.cod_fee, Money::ZERO);
        assert_eq!(totals.total, Money::from_cents(8_079));
        assert_eq!(totals.grand_total, Money::from_cents(8_079));
    }

    #[test]
    fn test_quote_cod_above_free_shipping() {
        // $120 x 1, cod: subtotal 120.00, shipping 0, tax 9.60,
        // total 129.60, grand total 132.59
        let totals = quote(&[line(12_000, 1)], PaymentMethod::Cod);
        assert_eq!(totals.subtotal, Money::from_cents(12_000));
        assert_eq!(totals.shipping, Money::ZERO);
        assert_eq!(totals.tax, Money::from_cents(960));
        assert_eq!(totals.cod_fee, COD_FEE);
        assert_eq!(totals.total, Money::from_cents(12_960));
        assert_eq!(totals.grand_total, Money::from_cents(13_259));
    }

    #[test]
    fn test_quote_multiple_lines() {
        let totals = quote(&[line(1_999, 2), line(2_500, 1)], PaymentMethod::Paypal);
        assert_eq!(totals.subtotal, Money::from_cents(6_498));
        assert_eq!(totals.shipping, FLAT_SHIPPING_RATE);
        // 8% of 64.98 = 5.1984 -> 5.20
        assert_eq!(totals.tax, Money::from_cents(520));
        assert_eq!(totals.total, Money::from_cents(8_617));
    }

    #[test]
    fn test_quote_empty_cart() {
        let totals = quote(&[], PaymentMethod::Card);
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.shipping, FLAT_SHIPPING_RATE);
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.total, FLAT_SHIPPING_RATE);
    }

    #[test]
    fn test_quote_zero_quantity_contributes_nothing() {
        let totals = quote(&[line(6_000, 0)], PaymentMethod::Card);
        assert_eq!(totals.subtotal, Money::ZERO);
    }

    #[test]
    fn test_totals_invariant_holds() {
        for method in [
            PaymentMethod::Card,
            PaymentMethod::Paypal,
            PaymentMethod::ApplePay,
            PaymentMethod::Cod,
        ] {
            let totals = quote(&[line(3_333, 3)], method);
            assert_eq!(
                totals.total,
                totals
                    .subtotal
                    .saturating_add(totals.shipping)
                    .saturating_add(totals.tax)
            );
            assert_eq!(totals.grand_total, totals.total.saturating_add(totals.cod_fee));
            assert_eq!(totals.cod_fee.is_zero(), method != PaymentMethod::Cod);
        }
    }

    #[test]
    fn test_payment_method_parse_roundtrip() {
        for method in [
            PaymentMethod::Card,
            PaymentMethod::Paypal,
            PaymentMethod::ApplePay,
            PaymentMethod::Cod,
        ] {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("bitcoin"), None);
    }
}
