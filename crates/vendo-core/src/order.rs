//! # Order Pricing & Validation Engine
//!
//! The pure half of the checkout workflow: given resolved products and the
//! requested lines, validates each line, freezes its pricing, and folds the
//! order totals.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Order Build Flow                              │
//! │                                                                     │
//! │  POST /api/orders { items: [...] }                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  vendo-db: open transaction, resolve each product_id                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  OrderDraft::push_line(product, request)  ← THIS MODULE             │
//! │       ├── quantity present and > 0?                                 │
//! │       ├── stock present and ≥ quantity (minus earlier lines)?       │
//! │       ├── unit price = override ▸ product price ▸ 0                 │
//! │       ├── tax exempt = line override OR product flag                │
//! │       └── line total = unit price × quantity                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  OrderDraft::finish()                                               │
//! │       ├── reject empty cart                                         │
//! │       └── totals: net, tax (13% of non-exempt), grand               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  vendo-db: decrement stock, insert order + items, commit            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are evaluated in request order and the first failure aborts the
//! whole build - no partial order ever leaves this module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;
use crate::types::Product;
use crate::TAX_RATE;

// =============================================================================
// Requested Line
// =============================================================================

/// One requested line of a create-order call, as received from the client.
///
/// `quantity` is optional at this level so that a missing field fails
/// validation (as an invalid quantity) rather than deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    /// Product to sell.
    pub product_id: i64,

    /// Requested quantity. Missing, zero or negative is rejected.
    pub quantity: Option<i64>,

    /// Optional unit-price override in cents. When absent, the product's
    /// stored price applies; when that is also absent, the line is free.
    pub unit_price_cents: Option<i64>,

    /// Optional tax-exempt override. The effective flag is the OR of this
    /// and the product's own flag.
    pub tax_exempt: Option<bool>,
}

// =============================================================================
// Priced Line
// =============================================================================

/// A validated line with its pricing frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub tax_exempt: bool,
}

/// Computed totals for a finished order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub net_total_cents: i64,
    pub tax_amount_cents: i64,
    pub grand_total_cents: i64,
}

// =============================================================================
// Order Error
// =============================================================================

/// Validation failures of the order workflow.
///
/// Every variant is a client fault surfaced as a 400 response; the display
/// strings are the exact response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Cart had zero items.
    #[error("Order must contain at least one item")]
    Empty,

    /// A referenced product id does not exist in the store.
    #[error("Product not found: id={product_id}")]
    ProductNotFound { product_id: i64 },

    /// Quantity missing, zero or negative.
    #[error("Invalid quantity for product id={product_id}")]
    InvalidQuantity { product_id: i64 },

    /// Requested quantity exceeds current stock (or stock is null).
    #[error("Not enough stock for product id={product_id}")]
    InsufficientStock { product_id: i64 },
}

// =============================================================================
// Order Draft
// =============================================================================

/// Accumulator for an order under construction.
///
/// Push each requested line with its resolved product in request order;
/// the first failure short-circuits the build. `finish` yields the priced
/// lines plus the folded totals.
#[derive(Debug, Default)]
pub struct OrderDraft {
    lines: Vec<PricedLine>,
    net_total: Money,
    taxable_total: Money,
}

impl OrderDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        OrderDraft::default()
    }

    /// Validates one requested line against its resolved product and
    /// appends it to the draft.
    ///
    /// ## Validation order
    /// 1. quantity present and positive
    /// 2. stock present and sufficient
    /// 3. price fallback: line override ▸ product price ▸ 0
    /// 4. tax-exempt: line override OR product flag
    ///
    /// A product may appear on multiple lines; later lines see the stock
    /// already reserved by earlier ones.
    pub fn push_line(
        &mut self,
        product: &Product,
        request: &OrderLineRequest,
    ) -> Result<(), OrderError> {
        let quantity = request.quantity.unwrap_or(0);
        if quantity <= 0 {
            return Err(OrderError::InvalidQuantity {
                product_id: product.id,
            });
        }

        let reserved = self.reserved_quantity(product.id);
        if !product.can_fulfill(reserved + quantity) {
            return Err(OrderError::InsufficientStock {
                product_id: product.id,
            });
        }

        let unit_price = request
            .unit_price_cents
            .or(product.price_cents)
            .unwrap_or(0);
        let tax_exempt = request.tax_exempt.unwrap_or(false) || product.tax_exempt;

        let line_total = Money::from_cents(unit_price).multiply_quantity(quantity);
        self.net_total += line_total;
        if !tax_exempt {
            self.taxable_total += line_total;
        }

        self.lines.push(PricedLine {
            product_id: product.id,
            quantity,
            unit_price_cents: unit_price,
            line_total_cents: line_total.cents(),
            tax_exempt,
        });

        Ok(())
    }

    /// Total quantity already drafted for the given product.
    fn reserved_quantity(&self, product_id: i64) -> i64 {
        self.lines
            .iter()
            .filter(|line| line.product_id == product_id)
            .map(|line| line.quantity)
            .sum()
    }

    /// Number of lines drafted so far.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Finalizes the draft: rejects the empty cart and computes totals.
    ///
    /// tax = 13% of the non-exempt share; grand = net + tax.
    pub fn finish(self) -> Result<(Vec<PricedLine>, OrderTotals), OrderError> {
        if self.lines.is_empty() {
            return Err(OrderError::Empty);
        }

        let tax_amount = self.taxable_total.calculate_tax(TAX_RATE);
        let grand_total = self.net_total + tax_amount;

        Ok((
            self.lines,
            OrderTotals {
                net_total_cents: self.net_total.cents(),
                tax_amount_cents: tax_amount.cents(),
                grand_total_cents: grand_total.cents(),
            },
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: i64, price_cents: Option<i64>, stock: Option<i64>) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price_cents,
            stock_quantity: stock,
            sku: format!("SKU-{}", id),
            tax_exempt: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(product_id: i64, quantity: i64) -> OrderLineRequest {
        OrderLineRequest {
            product_id,
            quantity: Some(quantity),
            unit_price_cents: None,
            tax_exempt: None,
        }
    }

    #[test]
    fn prices_a_basic_order() {
        // product: $10.00, stock 5; line: qty 2
        let product = test_product(1, Some(1000), Some(5));
        let mut draft = OrderDraft::new();
        draft.push_line(&product, &line(1, 2)).unwrap();
        let (lines, totals) = draft.finish().unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unit_price_cents, 1000);
        assert_eq!(lines[0].line_total_cents, 2000);
        assert!(!lines[0].tax_exempt);

        assert_eq!(totals.net_total_cents, 2000);
        assert_eq!(totals.tax_amount_cents, 260); // 13% of $20.00
        assert_eq!(totals.grand_total_cents, 2260);
    }

    #[test]
    fn line_tax_exempt_override_skips_tax() {
        let product = test_product(1, Some(1000), Some(5));
        let mut draft = OrderDraft::new();
        draft
            .push_line(
                &product,
                &OrderLineRequest {
                    product_id: 1,
                    quantity: Some(2),
                    unit_price_cents: None,
                    tax_exempt: Some(true),
                },
            )
            .unwrap();
        let (_, totals) = draft.finish().unwrap();

        assert_eq!(totals.net_total_cents, 2000);
        assert_eq!(totals.tax_amount_cents, 0);
        assert_eq!(totals.grand_total_cents, 2000);
    }

    #[test]
    fn product_tax_exempt_flag_skips_tax() {
        let mut product = test_product(1, Some(1000), Some(5));
        product.tax_exempt = true;

        let mut draft = OrderDraft::new();
        draft.push_line(&product, &line(1, 2)).unwrap();
        let (lines, totals) = draft.finish().unwrap();

        assert!(lines[0].tax_exempt);
        assert_eq!(totals.tax_amount_cents, 0);
    }

    #[test]
    fn mixed_exempt_and_taxable_lines() {
        let taxable = test_product(1, Some(1000), Some(10));
        let mut exempt = test_product(2, Some(500), Some(10));
        exempt.tax_exempt = true;

        let mut draft = OrderDraft::new();
        draft.push_line(&taxable, &line(1, 1)).unwrap();
        draft.push_line(&exempt, &line(2, 2)).unwrap();
        let (_, totals) = draft.finish().unwrap();

        // net = 1000 + 1000; only the first line is taxed
        assert_eq!(totals.net_total_cents, 2000);
        assert_eq!(totals.tax_amount_cents, 130);
        assert_eq!(totals.grand_total_cents, 2130);
    }

    #[test]
    fn unit_price_override_beats_product_price() {
        let product = test_product(1, Some(1000), Some(5));
        let mut draft = OrderDraft::new();
        draft
            .push_line(
                &product,
                &OrderLineRequest {
                    product_id: 1,
                    quantity: Some(2),
                    unit_price_cents: Some(750),
                    tax_exempt: None,
                },
            )
            .unwrap();
        let (lines, totals) = draft.finish().unwrap();

        assert_eq!(lines[0].unit_price_cents, 750);
        assert_eq!(totals.net_total_cents, 1500);
    }

    #[test]
    fn missing_price_and_override_prices_line_at_zero() {
        let product = test_product(1, None, Some(5));
        let mut draft = OrderDraft::new();
        draft.push_line(&product, &line(1, 3)).unwrap();
        let (lines, totals) = draft.finish().unwrap();

        assert_eq!(lines[0].unit_price_cents, 0);
        assert_eq!(totals.net_total_cents, 0);
        assert_eq!(totals.grand_total_cents, 0);
    }

    #[test]
    fn rejects_missing_quantity() {
        let product = test_product(1, Some(1000), Some(5));
        let mut draft = OrderDraft::new();
        let err = draft
            .push_line(
                &product,
                &OrderLineRequest {
                    product_id: 1,
                    quantity: None,
                    unit_price_cents: None,
                    tax_exempt: None,
                },
            )
            .unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity { product_id: 1 });
    }

    #[test]
    fn rejects_zero_and_negative_quantity() {
        let product = test_product(1, Some(1000), Some(5));
        let mut draft = OrderDraft::new();
        assert_eq!(
            draft.push_line(&product, &line(1, 0)).unwrap_err(),
            OrderError::InvalidQuantity { product_id: 1 }
        );
        assert_eq!(
            draft.push_line(&product, &line(1, -3)).unwrap_err(),
            OrderError::InvalidQuantity { product_id: 1 }
        );
    }

    #[test]
    fn rejects_quantity_over_stock() {
        let product = test_product(1, Some(1000), Some(5));
        let mut draft = OrderDraft::new();
        let err = draft.push_line(&product, &line(1, 6)).unwrap_err();
        assert_eq!(err, OrderError::InsufficientStock { product_id: 1 });
    }

    #[test]
    fn rejects_null_stock() {
        let product = test_product(1, Some(1000), None);
        let mut draft = OrderDraft::new();
        let err = draft.push_line(&product, &line(1, 1)).unwrap_err();
        assert_eq!(err, OrderError::InsufficientStock { product_id: 1 });
    }

    #[test]
    fn repeated_product_lines_share_the_same_stock() {
        // stock 5: a 3 + 3 split must fail on the second line
        let product = test_product(1, Some(1000), Some(5));
        let mut draft = OrderDraft::new();
        draft.push_line(&product, &line(1, 3)).unwrap();
        let err = draft.push_line(&product, &line(1, 3)).unwrap_err();
        assert_eq!(err, OrderError::InsufficientStock { product_id: 1 });

        // 3 + 2 exactly drains it
        let mut draft = OrderDraft::new();
        draft.push_line(&product, &line(1, 3)).unwrap();
        draft.push_line(&product, &line(1, 2)).unwrap();
        let (lines, totals) = draft.finish().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(totals.net_total_cents, 5000);
    }

    #[test]
    fn empty_draft_fails_to_finish() {
        let err = OrderDraft::new().finish().unwrap_err();
        assert_eq!(err, OrderError::Empty);
    }

    #[test]
    fn error_messages_are_the_response_bodies() {
        assert_eq!(
            OrderError::Empty.to_string(),
            "Order must contain at least one item"
        );
        assert_eq!(
            OrderError::ProductNotFound { product_id: 7 }.to_string(),
            "Product not found: id=7"
        );
        assert_eq!(
            OrderError::InvalidQuantity { product_id: 7 }.to_string(),
            "Invalid quantity for product id=7"
        );
        assert_eq!(
            OrderError::InsufficientStock { product_id: 7 }.to_string(),
            "Not enough stock for product id=7"
        );
    }

    #[test]
    fn totals_uphold_the_aggregate_invariant() {
        let a = test_product(1, Some(1234), Some(100));
        let mut b = test_product(2, Some(567), Some(100));
        b.tax_exempt = true;

        let mut draft = OrderDraft::new();
        draft.push_line(&a, &line(1, 3)).unwrap();
        draft.push_line(&b, &line(2, 7)).unwrap();
        let (lines, totals) = draft.finish().unwrap();

        let net: i64 = lines.iter().map(|l| l.line_total_cents).sum();
        let taxable: i64 = lines
            .iter()
            .filter(|l| !l.tax_exempt)
            .map(|l| l.line_total_cents)
            .sum();
        assert_eq!(totals.net_total_cents, net);
        assert_eq!(
            totals.tax_amount_cents,
            Money::from_cents(taxable).calculate_tax(TAX_RATE).cents()
        );
        assert_eq!(
            totals.grand_total_cents,
            totals.net_total_cents + totals.tax_amount_cents
        );
    }
}
