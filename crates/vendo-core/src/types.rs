//! # Domain Types
//!
//! Core domain types used throughout Vendo POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │     Order       │   │   OrderItem     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (i64)       │   │  id (i64)       │   │  order_id (FK)  │   │
//! │  │  sku (business) │   │  status         │   │  product_id (FK)│   │
//! │  │  price_cents?   │   │  *_total_cents  │   │  quantity       │   │
//! │  │  stock_quantity?│   │  created_at     │   │  line_total     │   │
//! │  │  tax_exempt     │   └─────────────────┘   └─────────────────┘   │
//! │  └─────────────────┘                                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐                         │
//! │  │    TaxRate      │   │  OrderStatus    │                         │
//! │  │  ─────────────  │   │  ─────────────  │                         │
//! │  │  bps (u32)      │   │  Paid ("PAID")  │                         │
//! │  │  1300 = 13%     │   └─────────────────┘                         │
//! │  └─────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is keyed by a store-assigned numeric surrogate id
//! (SQLite AUTOINCREMENT). Products additionally carry a unique,
//! human-readable SKU as a secondary lookup key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1300 bps = 13%, the fixed system-wide sales tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned numeric identifier, immutable after creation.
    pub id: i64,

    /// Display name shown on the register and receipts.
    pub name: String,

    /// Unit price in cents. Nullable: a missing price is treated as 0
    /// when an order line carries no explicit price override.
    pub price_cents: Option<i64>,

    /// Units currently in stock. Nullable: a missing (or negative) value
    /// never satisfies an order line.
    pub stock_quantity: Option<i64>,

    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,

    /// Whether this product's lines are excluded from tax.
    pub tax_exempt: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type, if one is set.
    #[inline]
    pub fn price(&self) -> Option<Money> {
        self.price_cents.map(Money::from_cents)
    }

    /// Checks whether this product can fulfill the requested quantity.
    ///
    /// A null stock level never fulfills an order.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        matches!(self.stock_quantity, Some(stock) if stock >= quantity)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// The order workflow produces exactly one terminal state: an order is
/// created fully paid. No further transitions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Order has been paid and finalized.
    Paid,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Paid
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed order aggregate.
///
/// Created once, fully populated, then persisted - never partially
/// mutated after save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    /// Sum of all line totals.
    pub net_total_cents: i64,
    /// Tax on the non-exempt share of the net total.
    pub tax_amount_cents: i64,
    /// net_total + tax_amount.
    pub grand_total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the net total as Money.
    #[inline]
    pub fn net_total(&self) -> Money {
        Money::from_cents(self.net_total_cents)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax_amount(&self) -> Money {
        Money::from_cents(self.tax_amount_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Owned exclusively by its order; references the product it was priced
/// from. Pricing is frozen at order time: later product edits do not
/// touch historical lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Quantity sold (always positive).
    pub quantity: i64,
    /// Unit price in cents at order time (override or product price).
    pub unit_price_cents: i64,
    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
    /// Effective flag: line override OR product flag.
    pub tax_exempt: bool,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1300);
        assert_eq!(rate.bps(), 1300);
        assert!((rate.percentage() - 13.0).abs() < 0.001);
    }

    #[test]
    fn test_order_status_default() {
        let status = OrderStatus::default();
        assert_eq!(status, OrderStatus::Paid);
    }

    #[test]
    fn test_product_can_fulfill() {
        let mut product = Product {
            id: 1,
            name: "Test".to_string(),
            price_cents: Some(1000),
            stock_quantity: Some(5),
            sku: "SKU-1".to_string(),
            tax_exempt: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(product.can_fulfill(5));
        assert!(!product.can_fulfill(6));

        // Null stock never fulfills
        product.stock_quantity = None;
        assert!(!product.can_fulfill(1));

        // Negative stock never fulfills
        product.stock_quantity = Some(-1);
        assert!(!product.can_fulfill(1));
    }

    #[test]
    fn test_order_item_money_accessors() {
        let item = OrderItem {
            id: 1,
            order_id: 1,
            product_id: 1,
            quantity: 2,
            unit_price_cents: 1000,
            line_total_cents: 2000,
            tax_exempt: false,
        };
        assert_eq!(item.unit_price().cents(), 1000);
        assert_eq!(item.line_total().cents(), 2000);
    }
}
