//! # Order Repository
//!
//! Database operations for orders and order items - the Order Store
//! collaborator plus the checkout unit of work.
//!
//! ## Checkout Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     place_order(lines)                              │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    for each requested line (request order):                         │
//! │      ├── SELECT product         ── missing id → ProductNotFound     │
//! │      └── OrderDraft::push_line  ── quantity/stock/price rules       │
//! │    OrderDraft::finish           ── empty cart, totals               │
//! │    │                                                                │
//! │    ├── any failure → ROLLBACK: no stock moves, nothing persisted    │
//! │    │                                                                │
//! │    for each priced line: UPDATE products SET stock -= qty           │
//! │    INSERT order (status PAID, totals, created_at)                   │
//! │    INSERT order_items (insertion order preserved)                   │
//! │  COMMIT                                                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation and the stock apply live in one transaction, so a mid-cart
//! failure leaves every product untouched and concurrent checkouts cannot
//! both pass the stock check against a stale read.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use vendo_core::{Order, OrderDraft, OrderError, OrderItem, OrderLineRequest, OrderStatus, Product};

// =============================================================================
// Checkout Error
// =============================================================================

/// Failure of the checkout unit of work.
///
/// Splits client faults (validation, surfaced as 400) from infrastructure
/// faults (storage, surfaced as 5xx).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A validation rule rejected the request. Nothing was persisted.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The storage layer failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Db(DbError::from(err))
    }
}

// =============================================================================
// Order Repository
// =============================================================================

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, status, net_total_cents, tax_amount_cents, grand_total_cents,
                   created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Lists all orders in id order.
    pub async fn list_all(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, status, net_total_cents, tax_amount_cents, grand_total_cents,
                   created_at
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Gets all items of an order, in insertion order.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price_cents,
                   line_total_cents, tax_exempt
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Places an order: the checkout unit of work.
    ///
    /// Resolves and validates every requested line inside one transaction,
    /// and only if the whole cart validates applies the stock decrements
    /// and persists the order aggregate. On any validation failure the
    /// transaction rolls back and the error reports the offending line.
    ///
    /// ## Returns
    /// The persisted order with its items, in insertion order.
    pub async fn place_order(
        &self,
        lines: &[OrderLineRequest],
    ) -> Result<(Order, Vec<OrderItem>), CheckoutError> {
        if lines.is_empty() {
            return Err(OrderError::Empty.into());
        }

        debug!(lines = lines.len(), "Placing order");

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        // Resolve + validate every line against a consistent snapshot.
        let mut draft = OrderDraft::new();
        for line in lines {
            let product = sqlx::query_as::<_, Product>(
                r#"
                SELECT id, name, price_cents, stock_quantity, sku, tax_exempt,
                       created_at, updated_at
                FROM products
                WHERE id = ?1
                "#,
            )
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let product = product.ok_or(OrderError::ProductNotFound {
                product_id: line.product_id,
            })?;

            draft.push_line(&product, line)?;
        }

        let (priced_lines, totals) = draft.finish()?;

        // All lines validated: apply every decrement.
        let now = Utc::now();
        for line in &priced_lines {
            sqlx::query(
                r#"
                UPDATE products SET
                    stock_quantity = stock_quantity - ?2,
                    updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        // Persist the aggregate.
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (status, net_total_cents, tax_amount_cents,
                                grand_total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, status, net_total_cents, tax_amount_cents,
                      grand_total_cents, created_at
            "#,
        )
        .bind(OrderStatus::Paid)
        .bind(totals.net_total_cents)
        .bind(totals.tax_amount_cents)
        .bind(totals.grand_total_cents)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(priced_lines.len());
        for line in &priced_lines {
            let item = sqlx::query_as::<_, OrderItem>(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity,
                                         unit_price_cents, line_total_cents, tax_exempt)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                RETURNING id, order_id, product_id, quantity, unit_price_cents,
                          line_total_cents, tax_exempt
                "#,
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price_cents)
            .bind(line.line_total_cents)
            .bind(line.tax_exempt)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            order_id = %order.id,
            grand_total_cents = %order.grand_total_cents,
            items = items.len(),
            "Order placed"
        );

        Ok((order, items))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::NewProduct;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, sku: &str, price: Option<i64>, stock: Option<i64>) -> i64 {
        db.products()
            .insert(&NewProduct {
                name: format!("Product {}", sku),
                price_cents: price,
                stock_quantity: stock,
                sku: sku.to_string(),
                tax_exempt: false,
            })
            .await
            .unwrap()
            .id
    }

    fn line(product_id: i64, quantity: i64) -> OrderLineRequest {
        OrderLineRequest {
            product_id,
            quantity: Some(quantity),
            unit_price_cents: None,
            tax_exempt: None,
        }
    }

    #[tokio::test]
    async fn place_order_persists_totals_and_decrements_stock() {
        let db = test_db().await;
        let product_id = seed_product(&db, "P-1", Some(1000), Some(5)).await;

        let (order, items) = db.orders().place_order(&[line(product_id, 2)]).await.unwrap();

        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.net_total_cents, 2000);
        assert_eq!(order.tax_amount_cents, 260);
        assert_eq!(order.grand_total_cents, 2260);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_id, order.id);
        assert_eq!(items[0].line_total_cents, 2000);

        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, Some(3));
    }

    #[tokio::test]
    async fn placed_order_round_trips_through_reads() {
        let db = test_db().await;
        let product_id = seed_product(&db, "P-1", Some(500), Some(10)).await;

        let (placed, _) = db.orders().place_order(&[line(product_id, 4)]).await.unwrap();

        let fetched = db.orders().get_by_id(placed.id).await.unwrap().unwrap();
        assert_eq!(fetched, placed);

        let all = db.orders().list_all().await.unwrap();
        assert_eq!(all.len(), 1);

        let items = db.orders().get_items(placed.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 4);
    }

    #[tokio::test]
    async fn item_order_follows_request_order() {
        let db = test_db().await;
        let a = seed_product(&db, "P-A", Some(100), Some(10)).await;
        let b = seed_product(&db, "P-B", Some(200), Some(10)).await;

        let (_, items) = db
            .orders()
            .place_order(&[line(b, 1), line(a, 1)])
            .await
            .unwrap();

        assert_eq!(items[0].product_id, b);
        assert_eq!(items[1].product_id, a);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_and_persists_nothing() {
        let db = test_db().await;

        let err = db.orders().place_order(&[]).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Order(OrderError::Empty)));
        assert!(db.orders().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_fails_and_rolls_back_earlier_lines() {
        let db = test_db().await;
        let known = seed_product(&db, "P-1", Some(1000), Some(5)).await;

        let err = db
            .orders()
            .place_order(&[line(known, 2), line(9999, 1)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Order(OrderError::ProductNotFound { product_id: 9999 })
        ));

        // The valid first line must not have moved stock.
        let product = db.products().get_by_id(known).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, Some(5));
        assert!(db.orders().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insufficient_stock_leaves_stock_unchanged() {
        let db = test_db().await;
        let product_id = seed_product(&db, "P-1", Some(1000), Some(5)).await;

        let err = db.orders().place_order(&[line(product_id, 6)]).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Order(OrderError::InsufficientStock { .. })
        ));

        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, Some(5));
    }

    #[tokio::test]
    async fn invalid_quantity_is_rejected() {
        let db = test_db().await;
        let product_id = seed_product(&db, "P-1", Some(1000), Some(5)).await;

        let err = db.orders().place_order(&[line(product_id, 0)]).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Order(OrderError::InvalidQuantity { .. })
        ));
    }

    #[tokio::test]
    async fn null_stock_never_fulfills() {
        let db = test_db().await;
        let product_id = seed_product(&db, "P-1", Some(1000), None).await;

        let err = db.orders().place_order(&[line(product_id, 1)]).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Order(OrderError::InsufficientStock { .. })
        ));
    }

    #[tokio::test]
    async fn price_override_and_exempt_flag_flow_through() {
        let db = test_db().await;
        let product_id = seed_product(&db, "P-1", Some(1000), Some(5)).await;

        let (order, items) = db
            .orders()
            .place_order(&[OrderLineRequest {
                product_id,
                quantity: Some(2),
                unit_price_cents: Some(750),
                tax_exempt: Some(true),
            }])
            .await
            .unwrap();

        assert_eq!(items[0].unit_price_cents, 750);
        assert_eq!(items[0].line_total_cents, 1500);
        assert!(items[0].tax_exempt);
        assert_eq!(order.net_total_cents, 1500);
        assert_eq!(order.tax_amount_cents, 0);
        assert_eq!(order.grand_total_cents, 1500);
    }

    #[tokio::test]
    async fn consecutive_orders_drain_stock() {
        let db = test_db().await;
        let product_id = seed_product(&db, "P-1", Some(1000), Some(5)).await;

        db.orders().place_order(&[line(product_id, 3)]).await.unwrap();
        db.orders().place_order(&[line(product_id, 2)]).await.unwrap();

        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, Some(0));

        // The well is dry now.
        let err = db.orders().place_order(&[line(product_id, 1)]).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Order(OrderError::InsufficientStock { .. })
        ));
    }
}
