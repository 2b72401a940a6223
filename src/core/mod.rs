//! Core catalog types: products, filters, facets and the filter engine

pub mod coerce;
pub mod engine;
pub mod error;
pub mod facets;
pub mod filter;
pub mod pagination;
pub mod product;
pub mod publish;

pub use engine::CatalogFilterEngine;
pub use error::{CatalogError, CatalogResult};
pub use facets::{Facet, Facets};
pub use filter::{FilterState, PriceRange, apply_filters, price_bounds};
pub use pagination::{PageRequest, Paginated, PaginationMeta, paginate};
pub use product::{EntityId, EntityRef, Product};
pub use publish::{BroadcastSink, FilterSink, NoopSink, ViewSnapshot};
