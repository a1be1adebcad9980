//! Session cart behavior and how its mutations flow into pricing input.

use sundrift_core::{Money, PaymentMethod, VariantId, quote};
use sundrift_storefront::models::cart::{Cart, CartLine, MAX_LINE_QUANTITY};

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
fn test_adding_same_variant_merges_quantities() {
    let mut cart = Cart::new();
    cart.add(line("v1", 1_500, 2));
    cart.add(line("v1", 1_500, 3));

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.item_count(), 5);
    assert_eq!(cart.subtotal(), Money::from_cents(7_500));
}

#[test]
fn test_quantities_clamp_to_line_maximum() {
    let mut cart = Cart::new();
    cart.add(line("v1", 1_000, 250));
    assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);

    // Merging can't push past the cap either
    cart.add(line("v1", 1_000, 10));
    assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);
}

#[test]
fn test_set_quantity_zero_removes_the_line() {
    let mut cart = Cart::new();
    cart.add(line("v1", 1_000, 2));
    cart.add(line("v2", 2_000, 1));

    cart.set_quantity(&VariantId::new("v1"), 0);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].variant_id, VariantId::new("v2"));

    // Unknown variants are ignored
    cart.set_quantity(&VariantId::new("missing"), 5);
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn test_remove_and_clear() {
    let mut cart = Cart::new();
    cart.add(line("v1", 1_000, 1));
    cart.add(line("v2", 2_000, 1));

    cart.remove(&VariantId::new("v1"));
    assert_eq!(cart.lines().len(), 1);

    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), Money::ZERO);
}

#[test]
fn test_line_items_mirror_cart_lines() {
    let mut cart = Cart::new();
    cart.add(line("v1", 1_999, 2));
    cart.add(line("v2", 2_500, 1));

    let items = cart.line_items();
    assert_eq!(items.len(), 2);
    assert_eq!(
        items.iter().map(|item| item.line_total()).sum::<Money>(),
        cart.subtotal()
    );
}

#[test]
fn test_cart_edits_reprice_the_order() {
    let mut cart = Cart::new();
    cart.add(line("v1", 6_000, 1));

    let before = quote(&cart.line_items(), PaymentMethod::Card);
    assert_eq!(before.shipping, Money::from_cents(1_599));

    // Bumping quantity past the threshold earns free shipping
    cart.set_quantity(&VariantId::new("v1"), 2);
    let after = quote(&cart.line_items(), PaymentMethod::Card);
    assert_eq!(after.subtotal, Money::from_cents(12_000));
    assert_eq!(after.shipping, Money::ZERO);
}
