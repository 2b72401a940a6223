//! HTTP handlers for catalog routes

use super::params::CatalogQuery;
use crate::core::error::CatalogError;
use crate::core::facets::Facets;
use crate::core::filter::apply_filters;
use crate::core::pagination::{Paginated, paginate};
use crate::core::product::Product;
use crate::server::host::CatalogHost;
use axum::Json;
use axum::extract::{Query, State};
use std::sync::Arc;

/// GET /products - filtered, ordered and paginated product listing
pub async fn list_products(
    State(host): State<Arc<CatalogHost>>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Paginated<Product>>, CatalogError> {
    let products = host.source.fetch_products().await?;
    let filters = query.to_filters(&products)?;
    let page = query.page_request(host.default_page_limit())?;

    let visible = apply_filters(&products, &filters);

    tracing::debug!(
        total = products.len(),
        visible = visible.len(),
        page = page.page(),
        "Listing catalog"
    );

    Ok(Json(paginate(&visible, page)))
}

/// GET /facets - brand and supplier choices and price bounds
pub async fn list_facets(
    State(host): State<Arc<CatalogHost>>,
) -> Result<Json<Facets>, CatalogError> {
    let products = host.source.fetch_products().await?;
    Ok(Json(Facets::from_products(&products)))
}
