//! TinySteps
//!
//! Business core of the TinySteps storefront client: cart management,
//! delivery pricing, checkout validation and order assembly. Everything in
//! this crate is pure and synchronous; network and storage live in the
//! application crate.

pub mod cart;
pub mod checkout;
pub mod format;
pub mod orders;
pub mod pricing;
pub mod products;
