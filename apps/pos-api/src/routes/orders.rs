//! Order creation and lookup endpoints.
//!
//! The create handler is a thin shim: it maps the JSON body onto the core
//! line requests, hands them to the checkout unit of work, and serializes
//! the persisted aggregate back out with each item's product nested.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendo_core::{Order, OrderItem, OrderLineRequest, OrderStatus};

use crate::error::ApiError;
use crate::routes::products::ProductResponse;
use crate::AppState;

// -- Request types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Missing or empty both fail with the empty-order error.
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: i64,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub unit_price_cents: Option<i64>,
    #[serde(default)]
    pub tax_exempt: Option<bool>,
}

impl From<&OrderItemRequest> for OrderLineRequest {
    fn from(req: &OrderItemRequest) -> Self {
        OrderLineRequest {
            product_id: req.product_id,
            quantity: req.quantity,
            unit_price_cents: req.unit_price_cents,
            tax_exempt: req.tax_exempt,
        }
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub net_total_cents: i64,
    pub tax_amount_cents: i64,
    pub grand_total_cents: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i64,
    pub product: ProductResponse,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub tax_exempt: bool,
}

// -- Handlers --

/// POST /api/orders — place an order.
///
/// Success → 200 with the full persisted aggregate. Validation failure →
/// 400 with a plain-text reason; nothing is persisted and no stock moves.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let lines: Vec<OrderLineRequest> = req.items.iter().map(OrderLineRequest::from).collect();

    let (order, items) = state.db.orders().place_order(&lines).await?;

    Ok(Json(order_response(&state, order, items).await?))
}

/// GET /api/orders — list all orders.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.db.orders().list_all().await?;

    let mut responses = Vec::with_capacity(orders.len());
    for order in orders {
        let items = state.db.orders().get_items(order.id).await?;
        responses.push(order_response(&state, order, items).await?);
    }

    Ok(Json(responses))
}

/// GET /api/orders/{id} — fetch one order.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .db
        .orders()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {id}")))?;

    let items = state.db.orders().get_items(order.id).await?;
    Ok(Json(order_response(&state, order, items).await?))
}

/// Assembles the response aggregate, nesting each item's product.
async fn order_response(
    state: &AppState,
    order: Order,
    items: Vec<OrderItem>,
) -> Result<OrderResponse, ApiError> {
    let mut item_responses = Vec::with_capacity(items.len());
    for item in items {
        // Items FK-reference products with RESTRICT, so the lookup can
        // only miss if the row vanished mid-request.
        let product = state
            .db
            .products()
            .get_by_id(item.product_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Product not found: {}", item.product_id)))?;

        item_responses.push(OrderItemResponse {
            id: item.id,
            product: product.into(),
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
            line_total_cents: item.line_total_cents,
            tax_exempt: item.tax_exempt,
        });
    }

    Ok(OrderResponse {
        id: order.id,
        created_at: order.created_at,
        status: order.status,
        items: item_responses,
        net_total_cents: order.net_total_cents,
        tax_amount_cents: order.tax_amount_cents,
        grand_total_cents: order.grand_total_cents,
    })
}
