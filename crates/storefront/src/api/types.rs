//! Domain types for the Sundrift Commerce API.
//!
//! These mirror the API's JSON shapes. Monetary amounts arrive as decimal
//! strings (`"19.99"`) and are parsed into cents only where arithmetic
//! happens; the order payload we send carries integer cents explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sundrift_core::{Money, OrderDraft, OrderId, PaymentMethod, ProductId, ShippingDetails, Totals, VariantId};

// =============================================================================
// Money
// =============================================================================

/// Monetary amount as transmitted by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMoney {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl ApiMoney {
    /// Parse into integer cents, treating malformed amounts as zero.
    ///
    /// Malformed price data from the API renders as $0.00 rather than
    /// failing the whole page.
    #[must_use]
    pub fn to_money(&self) -> Money {
        Money::parse(&self.amount).unwrap_or(Money::ZERO)
    }
}

// =============================================================================
// Products
// =============================================================================

/// Product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub title: String,
    pub price: ApiMoney,
    pub available: bool,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// URL slug, unique across the catalog.
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Price of the cheapest variant.
    pub price: ApiMoney,
    #[serde(default)]
    pub compare_at_price: Option<ApiMoney>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default = "default_true")]
    pub available: bool,
}

const fn default_true() -> bool {
    true
}

impl Product {
    /// First image, used for listing grids.
    #[must_use]
    pub fn featured_image(&self) -> Option<&Image> {
        self.images.first()
    }
}

/// One page of the product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: u32,
    pub total_pages: u32,
}

// =============================================================================
// Orders
// =============================================================================

/// Shipping address as the API stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl From<ShippingDetails> for OrderAddress {
    fn from(details: ShippingDetails) -> Self {
        Self {
            first_name: details.first_name,
            last_name: details.last_name,
            email: details.email,
            phone: if details.phone.is_empty() {
                None
            } else {
                Some(details.phone)
            },
            address: details.address,
            city: details.city,
            state: details.state,
            zip: details.zip,
            country: details.country,
        }
    }
}

/// Order totals in integer cents, exactly as the checkout derived them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal_cents: Money,
    pub shipping_cents: Money,
    pub tax_cents: Money,
    pub cod_fee_cents: Money,
    pub total_cents: Money,
    pub grand_total_cents: Money,
}

impl From<Totals> for OrderTotals {
    fn from(totals: Totals) -> Self {
        Self {
            subtotal_cents: totals.subtotal,
            shipping_cents: totals.shipping,
            tax_cents: totals.tax,
            cod_fee_cents: totals.cod_fee,
            total_cents: totals.total,
            grand_total_cents: totals.grand_total,
        }
    }
}

/// A line item as submitted with an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub variant_id: VariantId,
    pub quantity: u32,
    pub unit_price_cents: Money,
}

/// The `POST /orders` request body.
///
/// Card data never appears here: the wizard's [`OrderDraft`] carries
/// shipping, method, and totals only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Client-generated idempotency reference.
    pub reference: Uuid,
    pub shipping: OrderAddress,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
    pub lines: Vec<OrderLineRequest>,
}

impl OrderRequest {
    /// Assemble the request from a submitted checkout draft and the cart
    /// lines it priced.
    #[must_use]
    pub fn from_draft(draft: OrderDraft, lines: Vec<OrderLineRequest>) -> Self {
        Self {
            reference: Uuid::new_v4(),
            shipping: draft.shipping.into(),
            payment_method: draft.method,
            totals: draft.totals.into(),
            lines,
        }
    }
}

/// An order as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub shipping: OrderAddress,
    pub totals: OrderTotals,
}

// =============================================================================
// Newsletter & Contact
// =============================================================================

/// `POST /subscribers` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest<'a> {
    pub email: &'a str,
}

/// `POST /contact` request body.
#[derive(Debug, Clone, Serialize)]
pub struct ContactRequest {
    pub product: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sundrift_core::{CheckoutEvent, CheckoutState, LineItem};

    #[test]
    fn test_api_money_parses_decimal_strings() {
        let money = ApiMoney {
            amount: "19.99".to_string(),
            currency_code: "USD".to_string(),
        };
        assert_eq!(money.to_money(), Money::from_cents(1_999));
    }

    #[test]
    fn test_api_money_malformed_amount_is_zero() {
        let money = ApiMoney {
            amount: "not-a-number".to_string(),
            currency_code: "USD".to_string(),
        };
        assert_eq!(money.to_money(), Money::ZERO);
    }

    #[test]
    fn test_order_address_empty_phone_becomes_none() {
        let details = ShippingDetails {
            first_name: "Avery".into(),
            last_name: "Lane".into(),
            email: "avery@example.com".into(),
            phone: String::new(),
            address: "123 Driftwood Way".into(),
            city: "Astoria".into(),
            state: "OR".into(),
            zip: "97103".into(),
            country: "US".into(),
        };
        let address = OrderAddress::from(details);
        assert_eq!(address.phone, None);
    }

    #[test]
    fn test_order_request_from_draft_carries_no_card_data() {
        let shipping = ShippingDetails {
            first_name: "Avery".into(),
            last_name: "Lane".into(),
            email: "avery@example.com".into(),
            phone: "555-0100".into(),
            address: "123 Driftwood Way".into(),
            city: "Astoria".into(),
            state: "OR".into(),
            zip: "97103".into(),
            country: "US".into(),
        };
        let lines = vec![LineItem::new(Money::from_cents(12_000), 1)];
        let state = match CheckoutState::new()
            .apply(CheckoutEvent::SubmitShipping(shipping), &lines)
        {
            sundrift_core::Outcome::Advanced(state) => state,
            other => panic!("expected advance, got {other:?}"),
        };
        let state = match state.apply(
            CheckoutEvent::SelectMethod(PaymentMethod::Cod),
            &lines,
        ) {
            sundrift_core::Outcome::Advanced(state) => state,
            other => panic!("expected advance, got {other:?}"),
        };
        let draft = match state.apply(
            CheckoutEvent::SubmitPayment(sundrift_core::CardDetails::default()),
            &lines,
        ) {
            sundrift_core::Outcome::Submitted(draft) => draft,
            other => panic!("expected submission, got {other:?}"),
        };

        let request = OrderRequest::from_draft(draft, Vec::new());
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"payment_method\":\"cod\""));
        assert!(json.contains("\"grand_total_cents\":13259"));
        assert!(!json.contains("card"));
        assert!(json.contains("\"phone\":\"555-0100\""));
    }
}
