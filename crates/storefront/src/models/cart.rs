//! The session-backed shopping cart.
//!
//! The cart is serialized into the session between requests. Prices are
//! captured in cents at add-to-cart time from the API's product data; the
//! checkout engine prices the order from these lines at submit time.

use serde::{Deserialize, Serialize};

use sundrift_core::{LineItem, Money, VariantId};

/// Highest quantity a single line can hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub variant_id: VariantId,
    /// Product URL slug, for linking back to the product page.
    pub product_handle: String,
    pub title: String,
    /// Variant title when the product has real variants.
    #[serde(default)]
    pub variant_title: Option<String>,
    pub unit_price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartLine {
    /// Extended price for the line.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// The shopping cart: an ordered list of lines keyed by variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The cart lines as the pricing calculator sees them.
    #[must_use]
    pub fn line_items(&self) -> Vec<LineItem> {
        self.lines
            .iter()
            .map(|line| LineItem::new(line.unit_price, line.quantity))
            .collect()
    }

    /// Add units of a variant, merging into an existing line if present.
    ///
    /// Quantity clamps to 1..=[`MAX_LINE_QUANTITY`].
    pub fn add(&mut self, mut line: CartLine) {
        line.quantity = line.quantity.clamp(1, MAX_LINE_QUANTITY);

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.variant_id == line.variant_id)
        {
            existing.quantity = existing
                .quantity
                .saturating_add(line.quantity)
                .min(MAX_LINE_QUANTITY);
        } else {
            self.lines.push(line);
        }
    }

    /// Set the quantity of a line. Zero removes the line.
    ///
    /// Unknown variant ids are ignored.
    pub fn set_quantity(&mut self, variant_id: &VariantId, quantity: u32) {
        if quantity == 0 {
            self.remove(variant_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.variant_id == variant_id) {
            line.quantity = quantity.min(MAX_LINE_QUANTITY);
        }
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, variant_id: &VariantId) {
        self.lines.retain(|l| &l.variant_id != variant_id);
    }

    /// Empty the cart (after a successful order).
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, cents: i64, quantity: u32) -> CartLine {
        CartLine {
            variant_id: VariantId::new(id),
            product_handle: format!("product-{id}"),
            title: format!("Product {id}"),
            variant_title: None,
            unit_price: Money::from_cents(cents),
            quantity,
            image_url: None,
        }
    }

    #[test]
    fn test_add_and_subtotal() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1_999, 2));
        cart.add(line("v2", 2_500, 1));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Money::from_cents(6_498));
    }

    #[test]
    fn test_add_merges_same_variant() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1_999, 1));
        cart.add(line("v1", 1_999, 2));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_clamps_quantity() {
        let mut cart = Cart::new();
        cart.add(line("v1", 100, 0));
        assert_eq!(cart.item_count(), 1);

        let mut cart = Cart::new();
        cart.add(line("v1", 100, 500));
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1_999, 2));
        cart.set_quantity(&VariantId::new("v1"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_variant_is_ignored() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1_999, 2));
        cart.set_quantity(&VariantId::new("missing"), 5);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1_999, 2));
        cart.add(line("v2", 2_500, 1));
        cart.remove(&VariantId::new("v1"));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].variant_id, VariantId::new("v2"));
    }

    #[test]
    fn test_line_items_for_pricing() {
        let mut cart = Cart::new();
        cart.add(line("v1", 6_000, 1));
        let items = cart.line_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].line_total(), Money::from_cents(6_000));
    }

    #[test]
    fn test_serde_roundtrip_for_session_storage() {
        let mut cart = Cart::new();
        cart.add(line("v1", 1_999, 2));
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
