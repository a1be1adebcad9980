//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (probes the commerce API)
//!
//! # Products
//! GET  /products               - Product listing
//! GET  /products/:handle       - Product detail
//! GET  /products/:handle/quick-view - Quick view fragment (HTMX)
//!
//! # Search
//! GET  /search                 - Full search page
//! GET  /search/suggest         - Search suggestions fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout (two-step wizard)
//! GET  /checkout               - Current wizard step
//! POST /checkout/shipping      - Submit shipping details
//! POST /checkout/method        - Select payment method (HTMX fragment)
//! POST /checkout/back          - Return to the shipping step
//! POST /checkout/payment       - Submit payment and place the order
//!
//! # Orders
//! GET  /orders/:id             - Order confirmation / status page
//!
//! # Content pages
//! GET  /pages/terms            - Terms of Service
//! GET  /pages/privacy          - Privacy Policy
//! GET  /pages/faq              - FAQ
//! GET  /pages/shipping-returns - Shipping & Returns
//! GET  /pages/accessibility    - Accessibility
//!
//! # Forms
//! POST /newsletter/subscribe   - Newsletter signup (HTMX fragment)
//! POST /contact/product-question - Product question (JSON)
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod newsletter;
pub mod orders;
pub mod pages;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
        .route("/{handle}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/shipping", post(checkout::submit_shipping))
        .route("/method", post(checkout::select_method))
        .route("/back", post(checkout::back))
        .route("/payment", post(checkout::submit_payment))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Search routes
        .nest("/search", search::router())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout wizard
        .nest("/checkout", checkout_routes())
        // Order confirmation
        .route("/orders/{id}", get(orders::show))
        // Content pages
        .nest("/pages", pages::router())
        // Forms (rate limited per IP)
        .merge(form_routes())
}

/// Public form posts, behind the strict per-IP rate limiter.
fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/contact/product-question", post(contact::product_question))
        .route_layer(crate::middleware::form_rate_limiter())
}
