//! HTTP route handlers.
//!
//! - [`products`] - product management endpoints (field-level plumbing)
//! - [`orders`] - order creation and lookup
//! - [`health`] - liveness probe

pub mod health;
pub mod orders;
pub mod products;
