//! Integration tests for the Sundrift Supply storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sundrift-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - The wizard driven end to end, cart through order request
//! - `pricing_rules` - Shipping, tax, and COD fee arithmetic
//! - `cart_behavior` - Session cart mutations and their pricing inputs

#![cfg_attr(not(test), forbid(unsafe_code))]
