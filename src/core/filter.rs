//! Filter state and the catalog filter function
//!
//! [`apply_filters`] is a pure function over a product slice: every active
//! predicate must hold for a product to be kept (AND semantics), and the
//! ordering flags only reorder what survives.

use crate::core::product::{EntityId, Product};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Inclusive price interval, always finite and ordered so that `min <= max`
///
/// The ends are only reachable through [`PriceRange::new`], which serde also
/// goes through, so a reversed or NaN range cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RangeEnds")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RangeEnds {
    min: f64,
    max: f64,
}

impl From<RangeEnds> for PriceRange {
    fn from(ends: RangeEnds) -> Self {
        Self::new(ends.min, ends.max)
    }
}

impl PriceRange {
    /// Build a range, swapping the ends if they arrive reversed; non-finite
    /// ends become `0.0`
    pub fn new(a: f64, b: f64) -> Self {
        let a = if a.is_finite() { a } else { 0.0 };
        let b = if b.is_finite() { b } else { 0.0 };
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// Clamp both ends into `bounds`, keeping `min <= max`
    pub fn clamp_to(&self, bounds: PriceRange) -> Self {
        Self::new(
            self.min.clamp(bounds.min, bounds.max),
            self.max.clamp(bounds.min, bounds.max),
        )
    }
}

/// Observed minimum and maximum sale price; `[0, 0]` for an empty list
pub fn price_bounds(products: &[Product]) -> PriceRange {
    let mut prices = products.iter().map(Product::sale_price);
    let Some(first) = prices.next() else {
        return PriceRange::default();
    };

    let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    PriceRange::new(min, max)
}

/// User-selected filters for the catalog view
///
/// Empty id sets mean "no restriction", not "match nothing".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search_term: String,
    pub price_range: PriceRange,
    pub show_customizable_only: bool,
    pub show_popular_only: bool,
    pub show_on_sale: bool,
    pub sort_newest_first: bool,
    pub selected_brand_ids: BTreeSet<EntityId>,
    pub selected_supplier_ids: BTreeSet<EntityId>,
}

impl FilterState {
    /// Default filters for a product list: nothing selected, the price range
    /// spanning every observed price
    pub fn for_products(products: &[Product]) -> Self {
        Self {
            price_range: price_bounds(products),
            ..Self::default()
        }
    }

    /// Trimmed, lower-cased search term, or `None` if it is blank
    fn normalized_term(&self) -> Option<String> {
        let term = self.search_term.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    /// Whether a single product passes every active predicate
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with_term(product, self.normalized_term().as_deref())
    }

    fn matches_with_term(&self, product: &Product, term: Option<&str>) -> bool {
        if let Some(term) = term
            && !product.name.to_lowercase().contains(term)
        {
            return false;
        }

        if !self.price_range.contains(product.sale_price()) {
            return false;
        }

        if self.show_customizable_only && !product.customize {
            return false;
        }

        if self.show_popular_only && !product.is_popular() {
            return false;
        }

        if self.show_on_sale && !product.is_on_sale() {
            return false;
        }

        member_of(&self.selected_brand_ids, product.brand.as_ref().map(|b| &b.id))
            && member_of(
                &self.selected_supplier_ids,
                product.supplier.as_ref().map(|s| &s.id),
            )
    }

    /// Ordering implied by the flags; `None` keeps input order
    fn ordering(&self) -> Option<fn(&&Product, &&Product) -> Ordering> {
        if self.sort_newest_first {
            Some(newest_first)
        } else if self.show_popular_only {
            Some(most_customized_first)
        } else {
            None
        }
    }
}

/// Undated products sort after every dated one
fn newest_first(a: &&Product, b: &&Product) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

fn most_customized_first(a: &&Product, b: &&Product) -> Ordering {
    b.customization_count.cmp(&a.customization_count)
}

/// Empty selection admits everything; otherwise the id must be present
fn member_of(selected: &BTreeSet<EntityId>, id: Option<&EntityId>) -> bool {
    selected.is_empty() || id.is_some_and(|id| selected.contains(id))
}

/// Borrowing variant of [`apply_filters`]
pub fn select<'a>(products: &'a [Product], filters: &FilterState) -> Vec<&'a Product> {
    let term = filters.normalized_term();

    let mut kept: Vec<&Product> = products
        .iter()
        .filter(|p| filters.matches_with_term(p, term.as_deref()))
        .collect();

    // sort_by is stable: ties keep their relative input order
    if let Some(cmp) = filters.ordering() {
        kept.sort_by(cmp);
    }

    kept
}

/// Filter and order `products` according to `filters`
///
/// The input is never modified; the result only ever contains products from
/// the input.
pub fn apply_filters(products: &[Product], filters: &FilterState) -> Vec<Product> {
    select(products, filters).into_iter().cloned().collect()
}
