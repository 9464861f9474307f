//! HTTP API server for Vendo POS.
//!
//! Thin REST surface over vendo-core and vendo-db: routing, DTO mapping,
//! error→status translation, CORS allow-list and request tracing.

pub mod config;
pub mod error;
pub mod routes;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use vendo_db::Database;

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Creates the Axum application router with all routes and shared state.
///
/// `allowed_origin` is the single origin admitted by the CORS layer
/// (the register frontend).
pub fn create_app(state: AppState, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/api/products",
            get(routes::products::list).post(routes::products::create),
        )
        .route(
            "/api/products/{id}",
            get(routes::products::get)
                .put(routes::products::update)
                .delete(routes::products::delete),
        )
        .route("/api/products/sku/{sku}", get(routes::products::get_by_sku))
        .route(
            "/api/orders",
            get(routes::orders::list).post(routes::orders::create),
        )
        .route("/api/orders/{id}", get(routes::orders::get))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origin)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
