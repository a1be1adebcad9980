//! Sundrift Core - Shared domain library.
//!
//! This crate provides the types and checkout logic used across Sundrift
//! components:
//! - `storefront` - Public-facing e-commerce site
//! - `integration-tests` - Cross-crate test suite
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and lets the checkout
//! wizard, pricing rules, and field formatters be tested without a running
//! server or UI layer.
//!
//! # Modules
//!
//! - [`types`] - Money, email, and type-safe ID newtypes
//! - [`checkout`] - Pricing calculator, field formatters, and the two-step
//!   checkout wizard state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod types;

pub use checkout::*;
pub use types::*;
