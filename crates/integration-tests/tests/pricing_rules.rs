//! Pricing rules exercised through the cart, the way the checkout
//! handlers price things: `Cart::line_items` fed into `quote`.

use sundrift_core::{Money, PaymentMethod, VariantId, quote};
use sundrift_storefront::models::cart::{Cart, CartLine};

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
fn test_free_shipping_requires_strictly_more_than_threshold() {
    let mut cart = Cart::new();
    cart.add(line("v1", 10_000, 1));

    // Exactly $100.00 still pays flat-rate shipping
    let totals = quote(&cart.line_items(), PaymentMethod::Card);
    assert_eq!(totals.shipping, Money::from_cents(1_599));

    // One more cent tips it over
    cart.add(line("v2", 1, 1));
    let totals = quote(&cart.line_items(), PaymentMethod::Card);
    assert_eq!(totals.shipping, Money::ZERO);
}

#[test]
fn test_tax_rounds_half_up_on_cart_subtotal() {
    let mut cart = Cart::new();
    // 3 x $11.06 = $33.18; 8% = $2.6544 -> $2.65
    cart.add(line("v1", 1_106, 3));
    let totals = quote(&cart.line_items(), PaymentMethod::Card);
    assert_eq!(totals.tax, Money::from_cents(265));

    // $1.00 subtotal alongside: 8% of $34.18 = $2.7344 -> $2.73
    cart.add(line("v2", 100, 1));
    let totals = quote(&cart.line_items(), PaymentMethod::Card);
    assert_eq!(totals.tax, Money::from_cents(273));
}

#[test]
fn test_cod_fee_applies_only_to_cash_on_delivery() {
    let mut cart = Cart::new();
    cart.add(line("v1", 4_500, 2));
    let lines = cart.line_items();

    for method in [
        PaymentMethod::Card,
        PaymentMethod::Paypal,
        PaymentMethod::ApplePay,
    ] {
        let totals = quote(&lines, method);
        assert!(totals.cod_fee.is_zero(), "{method:?} charged a COD fee");
        assert_eq!(totals.grand_total, totals.total);
    }

    let totals = quote(&lines, PaymentMethod::Cod);
    assert_eq!(totals.cod_fee, Money::from_cents(299));
    assert_eq!(
        totals.grand_total,
        totals.total.saturating_add(Money::from_cents(299))
    );
}

#[test]
fn test_switching_method_never_changes_pre_surcharge_total() {
    let mut cart = Cart::new();
    cart.add(line("v1", 7_250, 1));
    cart.add(line("v2", 1_825, 4));
    let lines = cart.line_items();

    let card = quote(&lines, PaymentMethod::Card);
    let cod = quote(&lines, PaymentMethod::Cod);

    assert_eq!(card.subtotal, cod.subtotal);
    assert_eq!(card.shipping, cod.shipping);
    assert_eq!(card.tax, cod.tax);
    assert_eq!(card.total, cod.total);
    assert_ne!(card.grand_total, cod.grand_total);
}

#[test]
fn test_quantity_scales_the_line_not_the_fees() {
    let mut cart = Cart::new();
    cart.add(line("v1", 2_000, 5));
    let totals = quote(&cart.line_items(), PaymentMethod::Cod);

    // 5 x $20 = $100 subtotal, not free shipping, single COD fee
    assert_eq!(totals.subtotal, Money::from_cents(10_000));
    assert_eq!(totals.shipping, Money::from_cents(1_599));
    assert_eq!(totals.cod_fee, Money::from_cents(299));
}

#[test]
fn test_totals_display_as_dollars() {
    let mut cart = Cart::new();
    cart.add(line("v1", 6_000, 1));
    let totals = quote(&cart.line_items(), PaymentMethod::Card);

    assert_eq!(totals.grand_total.to_string(), "$80.79");
    assert_eq!(totals.tax.to_string(), "$4.80");
}
