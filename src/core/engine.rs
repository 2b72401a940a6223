//! Stateful catalog view: products, filters and the current filtered result
//!
//! [`CatalogFilterEngine`] owns the filter state for one storefront view. The
//! hosting code changes filters through the setters and then calls
//! [`recompute`](CatalogFilterEngine::recompute), which re-runs the filter and
//! notifies the sink only if something actually changed.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut engine = CatalogFilterEngine::with_sink(products, |view: &[Product]| {
//!     grid.render(view);
//! });
//! engine.recompute();
//!
//! engine.set_search_term("mug");
//! engine.set_show_on_sale(true);
//! engine.recompute(); // one notification for both changes
//! ```

use crate::core::facets::Facets;
use crate::core::filter::{FilterState, PriceRange, apply_filters, price_bounds};
use crate::core::product::{EntityId, Product};
use crate::core::publish::{FilterSink, NoopSink};
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct CatalogFilterEngine {
    products: Arc<[Product]>,
    /// Derived from `products`; only rebuilt when the list itself is replaced
    facets: Facets,
    filters: FilterState,
    view: Vec<Product>,
    dirty: bool,
    sink: Arc<dyn FilterSink>,
}

impl CatalogFilterEngine {
    /// Engine without a sink; read results from `recompute()`
    pub fn new(products: impl Into<Arc<[Product]>>) -> Self {
        Self::with_sink(products, NoopSink)
    }

    pub fn with_sink(products: impl Into<Arc<[Product]>>, sink: impl FilterSink + 'static) -> Self {
        let products = products.into();
        let facets = Facets::from_products(&products);
        let filters = FilterState {
            price_range: facets.price_bounds,
            ..FilterState::default()
        };

        Self {
            products,
            facets,
            filters,
            view: Vec::new(),
            dirty: true,
            sink: Arc::new(sink),
        }
    }

    pub fn products(&self) -> &Arc<[Product]> {
        &self.products
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn price_bounds(&self) -> PriceRange {
        self.facets.price_bounds
    }

    /// The view produced by the last `recompute()`
    ///
    /// Setters called since then are not reflected until the next recompute.
    pub fn filtered(&self) -> &[Product] {
        &self.view
    }

    /// Whether a setter changed something since the last recompute
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the product list
    ///
    /// Passing the same shared list again is a no-op. For a new list the
    /// facets and price bounds are rebuilt; a price range still spanning the
    /// old bounds follows the new bounds, a narrowed one is clamped into them.
    pub fn set_products(&mut self, products: impl Into<Arc<[Product]>>) {
        let products = products.into();
        if Arc::ptr_eq(&self.products, &products) {
            return;
        }

        let old_bounds = self.facets.price_bounds;
        self.facets = Facets::from_products(&products);
        self.products = products;

        let bounds = self.facets.price_bounds;
        self.filters.price_range = if self.filters.price_range == old_bounds {
            bounds
        } else {
            self.filters.price_range.clamp_to(bounds)
        };
        self.dirty = true;

        tracing::debug!(
            total = self.products.len(),
            min_price = bounds.min(),
            max_price = bounds.max(),
            "Catalog product list replaced"
        );
    }

    fn update<T: PartialEq>(dirty: &mut bool, field: &mut T, value: T) -> bool {
        if *field == value {
            return false;
        }
        *field = value;
        *dirty = true;
        true
    }

    /// Each setter returns whether the state changed
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        Self::update(&mut self.dirty, &mut self.filters.search_term, term.into())
    }

    /// The range is ordered and clamped into the current price bounds
    pub fn set_price_range(&mut self, min: f64, max: f64) -> bool {
        let range = PriceRange::new(min, max).clamp_to(self.facets.price_bounds);
        Self::update(&mut self.dirty, &mut self.filters.price_range, range)
    }

    pub fn set_show_customizable_only(&mut self, value: bool) -> bool {
        Self::update(
            &mut self.dirty,
            &mut self.filters.show_customizable_only,
            value,
        )
    }

    pub fn set_show_popular_only(&mut self, value: bool) -> bool {
        Self::update(&mut self.dirty, &mut self.filters.show_popular_only, value)
    }

    pub fn set_show_on_sale(&mut self, value: bool) -> bool {
        Self::update(&mut self.dirty, &mut self.filters.show_on_sale, value)
    }

    pub fn set_sort_newest_first(&mut self, value: bool) -> bool {
        Self::update(&mut self.dirty, &mut self.filters.sort_newest_first, value)
    }

    pub fn set_selected_brand_ids(&mut self, ids: impl IntoIterator<Item = EntityId>) -> bool {
        let ids: BTreeSet<EntityId> = ids.into_iter().collect();
        Self::update(&mut self.dirty, &mut self.filters.selected_brand_ids, ids)
    }

    pub fn set_selected_supplier_ids(
        &mut self,
        ids: impl IntoIterator<Item = EntityId>,
    ) -> bool {
        let ids: BTreeSet<EntityId> = ids.into_iter().collect();
        Self::update(&mut self.dirty, &mut self.filters.selected_supplier_ids, ids)
    }

    /// Add the brand to the selection, or remove it if already selected
    pub fn toggle_brand(&mut self, id: impl Into<EntityId>) {
        toggle(&mut self.filters.selected_brand_ids, id.into());
        self.dirty = true;
    }

    pub fn toggle_supplier(&mut self, id: impl Into<EntityId>) {
        toggle(&mut self.filters.selected_supplier_ids, id.into());
        self.dirty = true;
    }

    /// Reset every filter to its default for the current product list
    pub fn clear_all(&mut self) -> bool {
        self.facets.price_bounds = price_bounds(&self.products);
        let defaults = FilterState::for_products(&self.products);
        Self::update(&mut self.dirty, &mut self.filters, defaults)
    }

    /// Re-run the filter if anything changed and publish the new view
    ///
    /// The sink is invoked exactly once per call that finds the state dirty
    /// and not at all otherwise.
    pub fn recompute(&mut self) -> &[Product] {
        if self.dirty {
            self.view = apply_filters(&self.products, &self.filters);
            self.dirty = false;

            tracing::debug!(
                total = self.products.len(),
                visible = self.view.len(),
                "Catalog view recomputed"
            );

            self.sink.publish(&self.view);
        }

        &self.view
    }
}

fn toggle(set: &mut BTreeSet<EntityId>, id: EntityId) {
    if !set.remove(&id) {
        set.insert(id);
    }
}
