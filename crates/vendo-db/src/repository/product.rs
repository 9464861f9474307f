//! # Product Repository
//!
//! Database operations for products - the Product Store collaborator.
//!
//! ## Key Operations
//! - Point lookups by id and by SKU
//! - Listing, insert (store-assigned id), partial update, delete
//! - Existence check for idempotent-feeling deletes
//!
//! Stock decrements are NOT here: they only happen inside the checkout
//! transaction owned by the order repository.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vendo_core::Product;

/// Input record for creating a product.
///
/// The id is assigned by the store; callers never supply one.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: Option<i64>,
    pub stock_quantity: Option<i64>,
    pub sku: String,
    pub tax_exempt: bool,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let product = repo.get_by_sku("COKE-330").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - product found
    /// * `Ok(None)` - product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock_quantity, sku, tax_exempt,
                   created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock_quantity, sku, tax_exempt,
                   created_at, updated_at
            FROM products
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products in id order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock_quantity, sku, tax_exempt,
                   created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a new product and returns it with its store-assigned id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - SKU already exists
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        debug!(sku = %new.sku, "Inserting product");

        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price_cents, stock_quantity, sku, tax_exempt,
                                  created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id, name, price_cents, stock_quantity, sku, tax_exempt,
                      created_at, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(new.price_cents)
        .bind(new.stock_quantity)
        .bind(&new.sku)
        .bind(new.tax_exempt)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Updates an existing product.
    ///
    /// Only name, price and stock are overwritten - SKU and the
    /// tax-exempt flag are left untouched by the update path.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - product doesn't exist
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        price_cents: Option<i64>,
        stock_quantity: Option<i64>,
    ) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = ?2,
                price_cents = ?3,
                stock_quantity = ?4,
                updated_at = ?5
            WHERE id = ?1
            RETURNING id, name, price_cents, stock_quantity, sku, tax_exempt,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(price_cents)
        .bind(stock_quantity)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Checks whether a product with the given id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Deletes a product by id.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - product doesn't exist
    /// * `DbError::ForeignKeyViolation` - order history references it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
