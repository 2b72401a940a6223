//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::CatalogHost;
use crate::config::CatalogConfig;
use crate::source::CatalogSource;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(CatalogConfig::from_yaml_file("catalog.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    source: Option<Arc<dyn CatalogSource>>,
    config: CatalogConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            source: None,
            config: CatalogConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an explicit catalog source instead of the one built from config
    pub fn with_source(mut self, source: impl CatalogSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the catalog, such as checkout callbacks
    /// or admin tooling.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    ///
    /// Without an explicit source, the REST backend named in the config is
    /// used behind a TTL cache.
    pub fn build_host(&mut self) -> Result<CatalogHost> {
        let config = self.config.clone();
        match self.source.take() {
            Some(source) => {
                config.validate()?;
                Ok(CatalogHost::new(source, config))
            }
            #[cfg(feature = "http")]
            None => Ok(CatalogHost::from_config(config)?),
            #[cfg(not(feature = "http"))]
            None => Err(anyhow::anyhow!(
                "CatalogSource is required. Call .with_source()"
            )),
        }
    }

    /// Build the final REST router with tracing and CORS layers
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);

        let app = RestExposure::build_router(host, custom_routes).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address, or `server.bind` from the config
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: Option<&str>) -> Result<()> {
        let addr = addr
            .map(str::to_string)
            .unwrap_or_else(|| self.config.server.bind.clone());
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    #[test]
    fn test_build_with_explicit_source() {
        let result = ServerBuilder::new()
            .with_source(StaticSource::default())
            .with_custom_routes(Router::new())
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_config_fails_build() {
        let mut config = CatalogConfig::default();
        config.pagination.default_limit = 0;

        let result = ServerBuilder::new()
            .with_source(StaticSource::default())
            .with_config(config)
            .build();
        assert!(result.is_err());
    }
}
