//! Server module for exposing the catalog over HTTP
//!
//! - `CatalogHost` holds the catalog source and configuration
//! - `RestExposure` turns a host into an Axum router
//! - `ServerBuilder` wires both together and serves with graceful shutdown

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::CatalogHost;
