//! Domain models for storefront.

pub mod cart;

pub use cart::{Cart, CartLine};

/// Keys for session-stored values.
pub mod session_keys {
    /// The session cart ([`super::Cart`]).
    pub const CART: &str = "cart";
    /// The in-progress checkout wizard state (`sundrift_core::CheckoutState`).
    pub const CHECKOUT: &str = "checkout";
}
