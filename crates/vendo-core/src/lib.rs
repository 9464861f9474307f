//! # vendo-core: Pure Business Logic for Vendo POS
//!
//! This crate is the **heart** of Vendo POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Vendo POS Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  pos-api (Axum REST server)                 │   │
//! │  │    /api/products CRUD ── /api/orders create/read            │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌─────────┐ │   │
//! │  │   │   types   │  │   money   │  │   order   │  │validation│ │   │
//! │  │   │  Product  │  │   Money   │  │OrderDraft │  │  rules  │ │   │
//! │  │   │   Order   │  │  TaxRate  │  │ pricing   │  │  checks │ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────────┘ │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                  vendo-db (Database Layer)                  │   │
//! │  │        SQLite queries, migrations, checkout transaction     │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderItem, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`order`] - Order pricing & validation engine
//! - [`error`] - Field validation error types
//! - [`validation`] - Product field validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::money::Money;
//! use vendo_core::TAX_RATE;
//!
//! // Tax on $20.00 at the fixed 13% system rate
//! let net = Money::from_cents(2000);
//! let tax = net.calculate_tax(TAX_RATE);
//! assert_eq!(tax.cents(), 260);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vendo_core::Money` instead of
// `use vendo_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use order::{OrderDraft, OrderError, OrderLineRequest, OrderTotals, PricedLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The fixed system-wide sales tax rate: 13%.
///
/// Applied to the non-exempt share of every order's net total. There is
/// no per-product or per-tenant rate in this system.
pub const TAX_RATE: TaxRate = TaxRate::from_bps(1300);
