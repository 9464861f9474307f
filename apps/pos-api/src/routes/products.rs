//! Product management endpoints.
//!
//! Field-level plumbing over the product store: no business rules beyond
//! field validation and the update path's rule that SKU and the
//! tax-exempt flag are never overwritten.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendo_core::validation::{validate_price_cents, validate_product_name, validate_sku};
use vendo_core::Product;
use vendo_db::NewProduct;

use crate::error::ApiError;
use crate::AppState;

// -- Response types --

/// Product DTO for API responses.
///
/// Decouples the domain model from the JSON contract and renames fields
/// to camelCase for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price_cents: Option<i64>,
    pub stock_quantity: Option<i64>,
    pub sku: String,
    pub tax_exempt: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            price_cents: p.price_cents,
            stock_quantity: p.stock_quantity,
            sku: p.sku,
            tax_exempt: p.tax_exempt,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// -- Request types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub tax_exempt: Option<bool>,
}

/// Update payload: only name, price and stock are overwritten.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
}

// -- Handlers --

/// GET /api/products — list all products.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.db.products().list_all().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// GET /api/products/{id} — fetch one product.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product not found: {id}")))?;
    Ok(Json(product.into()))
}

/// GET /api/products/sku/{sku} — fetch one product by its SKU.
#[tracing::instrument(skip(state))]
pub async fn get_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_sku(&sku)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product not found: {sku}")))?;
    Ok(Json(product.into()))
}

/// POST /api/products — create a product with a store-assigned id.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    validate_product_name(&req.name)?;
    validate_sku(&req.sku)?;
    validate_price_cents(req.price_cents)?;

    let product = state
        .db
        .products()
        .insert(&NewProduct {
            name: req.name.trim().to_string(),
            price_cents: req.price_cents,
            stock_quantity: req.stock_quantity,
            sku: req.sku.trim().to_string(),
            tax_exempt: req.tax_exempt.unwrap_or(false),
        })
        .await?;

    Ok(Json(product.into()))
}

/// PUT /api/products/{id} — overwrite name, price and stock.
///
/// SKU and the tax-exempt flag are left untouched by this path.
#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    validate_product_name(&req.name)?;
    validate_price_cents(req.price_cents)?;

    let product = state
        .db
        .products()
        .update(id, req.name.trim(), req.price_cents, req.stock_quantity)
        .await?;

    Ok(Json(product.into()))
}

/// DELETE /api/products/{id} — 204 on success, 404 when absent.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.db.products().exists(id).await? {
        return Err(ApiError::NotFound(format!("Product not found: {id}")));
    }

    state.db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
