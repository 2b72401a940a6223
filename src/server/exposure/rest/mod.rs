//! REST API exposure for the catalog
//!
//! The REST exposure consumes a `CatalogHost` and produces an Axum `Router`.

pub mod handlers;
pub mod params;

use super::super::host::CatalogHost;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - `GET /products` and `GET /facets`
    /// - Custom routes
    pub fn build_router(host: Arc<CatalogHost>, custom_routes: Vec<Router>) -> Router {
        let catalog_routes = Router::new()
            .route("/products", get(handlers::list_products))
            .route("/facets", get(handlers::list_facets))
            .with_state(host);

        let mut app = Self::health_routes().merge(catalog_routes);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "giftshop-catalog"
        }))
    }
}
