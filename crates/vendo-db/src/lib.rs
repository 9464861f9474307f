//! # vendo-db: Database Layer for Vendo POS
//!
//! This crate provides database access for the Vendo POS system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Vendo POS Data Flow                           │
//! │                                                                     │
//! │  HTTP handler (POST /api/orders)                                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                    vendo-db (THIS CRATE)                    │   │
//! │  │                                                             │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐ │   │
//! │  │   │   Database    │   │  Repositories │   │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │   │ (product.rs)  │   │  (embedded)  │ │   │
//! │  │   │               │   │ (order.rs)    │   │              │ │   │
//! │  │   │ SqlitePool    │◄──│ checkout tx   │   │ 001_init.sql │ │   │
//! │  │   └───────────────┘   └───────────────┘   └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (or :memory: in tests)                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vendo_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/vendo.db")).await?;
//! let products = db.products().list_all().await?;
//! let (order, items) = db.orders().place_order(&lines).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::order::{CheckoutError, OrderRepository};
pub use repository::product::{NewProduct, ProductRepository};
