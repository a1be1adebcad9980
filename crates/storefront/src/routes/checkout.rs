//! Checkout route handlers.
//!
//! The checkout is a two-step wizard (shipping, then payment) driven by
//! [`CheckoutState`] in `sundrift-core`. The wizard state lives in the
//! session alongside the cart; every transition goes through
//! `CheckoutState::apply`, so handlers never mutate step or field data
//! directly.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::{CartView, load_cart};
use crate::api::types::{OrderLineRequest, OrderRequest};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::models::cart::Cart;
use crate::models::session_keys;
use crate::state::AppState;
use sundrift_core::{
    CardDetails, CheckoutEvent, CheckoutState, CheckoutStep, FieldErrors, Outcome, PaymentMethod,
    ShippingDetails, Totals, quote,
};

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the checkout state from the session, defaulting to a fresh wizard.
async fn load_checkout(session: &Session) -> CheckoutState {
    session
        .get::<CheckoutState>(session_keys::CHECKOUT)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the checkout state to the session.
async fn save_checkout(
    session: &Session,
    state: &CheckoutState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CHECKOUT, state).await
}

/// Drop both the cart and the checkout state after a completed order.
async fn clear_after_order(session: &Session) {
    if let Err(e) = session.remove::<Cart>(session_keys::CART).await {
        tracing::error!("Failed to clear cart after order: {e}");
    }
    if let Err(e) = session
        .remove::<CheckoutState>(session_keys::CHECKOUT)
        .await
    {
        tracing::error!("Failed to clear checkout state after order: {e}");
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Shipping step form data.
#[derive(Debug, Deserialize)]
pub struct ShippingForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
}

impl From<ShippingForm> for ShippingDetails {
    fn from(form: ShippingForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            city: form.city,
            state: form.state,
            zip: form.zip,
            country: form.country,
        }
    }
}

/// Payment method selection form data.
#[derive(Debug, Deserialize)]
pub struct MethodForm {
    pub method: String,
}

/// Payment step form data.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    #[serde(default)]
    pub card_name: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub cvv: String,
}

impl From<PaymentForm> for CardDetails {
    fn from(form: PaymentForm) -> Self {
        Self {
            card_number: form.card_number,
            expiry_date: form.expiry_date,
            cvv: form.cvv,
            card_name: form.card_name,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Shipping step template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/shipping.html")]
pub struct ShippingStepTemplate {
    pub cart: CartView,
    pub totals: Totals,
    pub shipping: ShippingDetails,
    pub method: PaymentMethod,
    pub errors: FieldErrors,
}

/// Payment step template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/payment.html")]
pub struct PaymentStepTemplate {
    pub cart: CartView,
    pub totals: Totals,
    pub card: CardDetails,
    pub method: PaymentMethod,
    pub errors: FieldErrors,
    /// Order submission failure, shown above the form.
    pub banner: Option<String>,
}

/// Totals panel fragment (HTMX), re-rendered when the payment method
/// changes so the COD fee row appears or disappears.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_totals.html")]
pub struct CheckoutTotalsTemplate {
    pub totals: Totals,
    pub method: PaymentMethod,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the current wizard step.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let checkout = load_checkout(&session).await;
    let totals = quote(&cart.line_items(), checkout.method);

    match checkout.step {
        CheckoutStep::Shipping => ShippingStepTemplate {
            cart: CartView::from(&cart),
            totals,
            shipping: checkout.shipping,
            method: checkout.method,
            errors: FieldErrors::default(),
        }
        .into_response(),
        CheckoutStep::Payment => PaymentStepTemplate {
            cart: CartView::from(&cart),
            totals,
            card: checkout.card,
            method: checkout.method,
            errors: FieldErrors::default(),
            banner: None,
        }
        .into_response(),
    }
}

/// Submit the shipping step.
///
/// On success redirects back to `/checkout`, which now renders the payment
/// step. On validation failure re-renders the shipping form with inline
/// field errors and a 422 status.
#[instrument(skip(session, form))]
pub async fn submit_shipping(session: Session, Form(form): Form<ShippingForm>) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let checkout = load_checkout(&session).await;
    let lines = cart.line_items();

    match checkout.apply(CheckoutEvent::SubmitShipping(form.into()), &lines) {
        Outcome::Advanced(next) => {
            if let Err(e) = save_checkout(&session, &next).await {
                tracing::error!("Failed to save checkout state: {e}");
            }
            Redirect::to("/checkout").into_response()
        }
        Outcome::Rejected { state, errors } => {
            // Persist the entered values so a refresh keeps the customer's input
            if let Err(e) = save_checkout(&session, &state).await {
                tracing::error!("Failed to save checkout state: {e}");
            }
            let totals = quote(&lines, state.method);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                ShippingStepTemplate {
                    cart: CartView::from(&cart),
                    totals,
                    shipping: state.shipping,
                    method: state.method,
                    errors,
                },
            )
                .into_response()
        }
        Outcome::Submitted(_) => {
            // Unreachable from the shipping step; treat as a fresh start
            Redirect::to("/checkout").into_response()
        }
    }
}

/// Select a payment method (HTMX).
///
/// Returns the totals panel fragment so the COD fee row updates in place.
#[instrument(skip(session))]
pub async fn select_method(session: Session, Form(form): Form<MethodForm>) -> Response {
    let cart = load_cart(&session).await;
    let checkout = load_checkout(&session).await;
    let lines = cart.line_items();

    let method = PaymentMethod::parse(&form.method).unwrap_or_default();

    match checkout.apply(CheckoutEvent::SelectMethod(method), &lines) {
        Outcome::Advanced(next) | Outcome::Rejected { state: next, .. } => {
            if let Err(e) = save_checkout(&session, &next).await {
                tracing::error!("Failed to save checkout state: {e}");
            }
            let totals = quote(&lines, next.method);
            CheckoutTotalsTemplate {
                totals,
                method: next.method,
            }
            .into_response()
        }
        Outcome::Submitted(_) => Redirect::to("/checkout").into_response(),
    }
}

/// Return to the shipping step.
///
/// Always allowed; previously entered shipping and card data is preserved.
#[instrument(skip(session))]
pub async fn back(session: Session) -> Response {
    let cart = load_cart(&session).await;
    let checkout = load_checkout(&session).await;
    let lines = cart.line_items();

    match checkout.apply(CheckoutEvent::Back, &lines) {
        Outcome::Advanced(next) | Outcome::Rejected { state: next, .. } => {
            if let Err(e) = save_checkout(&session, &next).await {
                tracing::error!("Failed to save checkout state: {e}");
            }
        }
        Outcome::Submitted(_) => {}
    }

    Redirect::to("/checkout").into_response()
}

/// Submit the payment step and place the order.
///
/// On success the cart and wizard state are cleared and the client is
/// redirected to the order confirmation page. Card details validate only
/// for the card method; they are never sent to the commerce API.
#[instrument(skip(state, session, form))]
pub async fn submit_payment(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PaymentForm>,
) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let checkout = load_checkout(&session).await;
    let lines = cart.line_items();

    // Keep a copy so an order submission failure can re-render the step
    let retained = checkout.clone();

    match checkout.apply(CheckoutEvent::SubmitPayment(form.into()), &lines) {
        Outcome::Submitted(draft) => {
            add_breadcrumb("checkout", "Order draft assembled", None);

            let order_lines: Vec<OrderLineRequest> = cart
                .lines()
                .iter()
                .map(|line| OrderLineRequest {
                    variant_id: line.variant_id.clone(),
                    quantity: line.quantity,
                    unit_price_cents: line.unit_price,
                })
                .collect();

            let request = OrderRequest::from_draft(draft, order_lines);

            match state.api().submit_order(&request).await {
                Ok(order) => {
                    tracing::info!(order_id = %order.id, "Order placed");
                    clear_after_order(&session).await;
                    Redirect::to(&format!("/orders/{}", order.id)).into_response()
                }
                Err(e) => {
                    tracing::error!(error = %e, "Order submission failed");
                    let totals = quote(&lines, retained.method);
                    (
                        StatusCode::BAD_GATEWAY,
                        PaymentStepTemplate {
                            cart: CartView::from(&cart),
                            totals,
                            card: retained.card,
                            method: retained.method,
                            errors: FieldErrors::default(),
                            banner: Some(
                                "We couldn't place your order. \
                                 Your details are saved; please try again."
                                    .to_string(),
                            ),
                        },
                    )
                        .into_response()
                }
            }
        }
        Outcome::Rejected { state: next, errors } => {
            if let Err(e) = save_checkout(&session, &next).await {
                tracing::error!("Failed to save checkout state: {e}");
            }
            let totals = quote(&lines, next.method);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                PaymentStepTemplate {
                    cart: CartView::from(&cart),
                    totals,
                    card: next.card,
                    method: next.method,
                    errors,
                    banner: None,
                },
            )
                .into_response()
        }
        Outcome::Advanced(next) => {
            if let Err(e) = save_checkout(&session, &next).await {
                tracing::error!("Failed to save checkout state: {e}");
            }
            Redirect::to("/checkout").into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_rejected_shipping_input_survives_a_refresh() {
        let session = session();

        let entered = ShippingDetails {
            first_name: "Avery".into(),
            city: "Astoria".into(),
            // zip left blank, so the transition is rejected
            ..ShippingDetails::default()
        };

        let Outcome::Rejected { state, errors } =
            CheckoutState::new().apply(CheckoutEvent::SubmitShipping(entered), &[])
        else {
            panic!("expected rejection");
        };
        assert!(errors.get("zip").is_some());

        // The handler persists the rejected state; a reload sees the input
        save_checkout(&session, &state).await.unwrap();
        let reloaded = load_checkout(&session).await;
        assert_eq!(reloaded.step, CheckoutStep::Shipping);
        assert_eq!(reloaded.shipping.first_name, "Avery");
        assert_eq!(reloaded.shipping.city, "Astoria");
    }

    #[tokio::test]
    async fn test_clear_after_order_drops_cart_and_checkout() {
        let session = session();

        save_checkout(&session, &CheckoutState::new()).await.unwrap();
        session
            .insert(session_keys::CART, &Cart::new())
            .await
            .unwrap();

        clear_after_order(&session).await;

        let checkout: Option<CheckoutState> =
            session.get(session_keys::CHECKOUT).await.unwrap();
        assert!(checkout.is_none());
        let cart: Option<Cart> = session.get(session_keys::CART).await.unwrap();
        assert!(cart.is_none());
    }
}
