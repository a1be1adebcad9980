//! Checkout engine: pricing, input formatters, and the step wizard.
//!
//! The checkout flow is a two-step wizard (shipping details, then payment)
//! modeled as an explicit state machine so it can be driven and tested
//! without any HTTP or template layer. Handlers feed it events and render
//! whatever state comes back.
//!
//! - [`pricing`] - derives order totals from cart lines and payment method
//! - [`format`] - pure string formatters for card fields
//! - [`wizard`] - the `(state, event) -> outcome` transition function

pub mod format;
pub mod pricing;
pub mod wizard;

pub use format::{format_card_number, format_cvv, format_expiry};
pub use pricing::{LineItem, PaymentMethod, Totals, quote};
pub use wizard::{
    CardDetails, CheckoutEvent, CheckoutState, CheckoutStep, FieldErrors, OrderDraft, Outcome,
    ShippingDetails,
};
