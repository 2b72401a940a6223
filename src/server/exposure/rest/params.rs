//! Query-string parameters for catalog listings
//!
//! All fields arrive as optional strings and are interpreted here, so a bad
//! value produces a [`RequestError`] naming the parameter rather than a
//! generic extractor rejection.
//!
//! ```text
//! GET /products?search=mug&min_price=10&max_price=80&on_sale=true&brands=3,7&page=2&limit=24
//! ```

use crate::core::error::RequestError;
use crate::core::filter::{FilterState, PriceRange};
use crate::core::pagination::PageRequest;
use crate::core::product::{EntityId, Product};
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    /// Case-insensitive name search
    pub search: Option<String>,
    /// Lower price bound; defaults to the cheapest product
    pub min_price: Option<String>,
    /// Upper price bound; defaults to the most expensive product
    pub max_price: Option<String>,
    pub customizable: Option<String>,
    pub popular: Option<String>,
    pub on_sale: Option<String>,
    /// Newest first
    pub newest: Option<String>,
    /// Comma-separated brand ids
    pub brands: Option<String>,
    /// Comma-separated supplier ids
    pub suppliers: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl CatalogQuery {
    /// Filters for `products`; omitted parameters keep their defaults
    pub fn to_filters(&self, products: &[Product]) -> Result<FilterState, RequestError> {
        let mut filters = FilterState::for_products(products);
        let bounds = filters.price_range;

        if let Some(search) = &self.search {
            filters.search_term = search.clone();
        }

        let min = parse_price("min_price", self.min_price.as_deref())?.unwrap_or(bounds.min());
        let max = parse_price("max_price", self.max_price.as_deref())?.unwrap_or(bounds.max());
        filters.price_range = PriceRange::new(min, max).clamp_to(bounds);

        filters.show_customizable_only = parse_flag("customizable", self.customizable.as_deref())?;
        filters.show_popular_only = parse_flag("popular", self.popular.as_deref())?;
        filters.show_on_sale = parse_flag("on_sale", self.on_sale.as_deref())?;
        filters.sort_newest_first = parse_flag("newest", self.newest.as_deref())?;
        filters.selected_brand_ids = parse_ids(self.brands.as_deref());
        filters.selected_supplier_ids = parse_ids(self.suppliers.as_deref());

        Ok(filters)
    }

    pub fn page_request(&self, default_limit: usize) -> Result<PageRequest, RequestError> {
        let page = parse_count("page", self.page.as_deref())?.unwrap_or(1);
        let limit = parse_count("limit", self.limit.as_deref())?.unwrap_or(default_limit);
        Ok(PageRequest::new(page, limit))
    }
}

fn parse_price(name: &str, raw: Option<&str>) -> Result<Option<f64>, RequestError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(Some(price)),
        _ => Err(RequestError::invalid(name, raw, "expected a number")),
    }
}

/// A bare `?popular` (empty value) counts as true
fn parse_flag(name: &str, raw: Option<&str>) -> Result<bool, RequestError> {
    let Some(raw) = raw else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(RequestError::invalid(name, raw, "expected true or false")),
    }
}

fn parse_count(name: &str, raw: Option<&str>) -> Result<Option<usize>, RequestError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    raw.parse::<usize>()
        .map(Some)
        .map_err(|_| RequestError::invalid(name, raw, "expected a positive integer"))
}

fn parse_ids(raw: Option<&str>) -> BTreeSet<EntityId> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(EntityId::from)
            .collect()
    })
    .unwrap_or_default()
}
