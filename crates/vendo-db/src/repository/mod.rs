//! # Repository Module
//!
//! Database repository implementations for Vendo POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                               │
//! │                                                                     │
//! │  HTTP handler                                                       │
//! │       │                                                             │
//! │       │  db.products().get_by_sku("COKE-330")                       │
//! │       ▼                                                             │
//! │  ProductRepository / OrderRepository                                │
//! │       │                                                             │
//! │       │  SQL query                                                  │
//! │       ▼                                                             │
//! │  SQLite database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • SQL is isolated in one place                                     │
//! │  • Clean separation of concerns                                     │
//! │  • The checkout transaction lives behind one method                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - product CRUD and SKU lookup
//! - [`order::OrderRepository`] - order reads and the checkout transaction

pub mod order;
pub mod product;
