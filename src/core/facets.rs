//! Facet lists offered as filter choices
//!
//! Facets are always derived from the unfiltered product list so that picking
//! one brand does not make the others disappear from the selector.

use crate::core::filter::{PriceRange, price_bounds};
use crate::core::product::{EntityId, EntityRef, Product};
use indexmap::IndexMap;
use serde::Serialize;

/// One selectable filter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub id: EntityId,
    pub name: String,
}

/// Every facet list for a product list, plus its price bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facets {
    pub brands: Vec<Facet>,
    pub suppliers: Vec<Facet>,
    pub price_bounds: PriceRange,
}

impl Facets {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            brands: brand_facets(products),
            suppliers: supplier_facets(products),
            price_bounds: price_bounds(products),
        }
    }
}

/// Distinct references in order of first appearance; the first name seen for
/// an id is the one reported
fn distinct<'a>(refs: impl Iterator<Item = &'a EntityRef>) -> Vec<Facet> {
    let mut seen: IndexMap<&EntityId, &str> = IndexMap::new();
    for r in refs {
        seen.entry(&r.id).or_insert(r.name.as_str());
    }

    seen.into_iter()
        .map(|(id, name)| Facet {
            id: id.clone(),
            name: name.to_string(),
        })
        .collect()
}

pub fn brand_facets(products: &[Product]) -> Vec<Facet> {
    distinct(products.iter().filter_map(|p| p.brand.as_ref()))
}

pub fn supplier_facets(products: &[Product]) -> Vec<Facet> {
    distinct(products.iter().filter_map(|p| p.supplier.as_ref()))
}
