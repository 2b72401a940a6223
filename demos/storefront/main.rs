//! Storefront Example
//!
//! Runs the catalog service in one of two modes:
//! - `cargo run --example storefront -- catalog.yaml` serves the REST backend
//!   named in the config, behind the TTL cache
//! - `cargo run --example storefront` serves a built-in sample catalog
//!
//! Before serving, the sample catalog is pushed through the filter engine to
//! show how a UI layer receives filtered views.

use anyhow::Result;
use giftshop::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("giftshop=debug,info")),
        )
        .init();

    let builder = match std::env::args().nth(1) {
        Some(path) => {
            let config = CatalogConfig::from_yaml_file(&path)?.with_env_overrides();
            println!("📄 Loaded config from {path}");
            println!("🔗 Catalog API: {}", config.api.products_url());
            ServerBuilder::new().with_config(config)
        }
        None => {
            let products = sample_catalog();
            demo_filter_engine(products.clone()).await;
            println!("🎁 Serving {} sample products", products.len());
            ServerBuilder::new().with_source(StaticSource::new(products))
        }
    };

    println!("\n🌐 Routes:");
    println!("    GET    /health                          - Health check");
    println!("    GET    /products                        - Filtered, paginated listing");
    println!("    GET    /facets                          - Brands, suppliers, price bounds");
    println!("\n📋 Try:");
    println!("    curl 'http://127.0.0.1:3000/products?search=mug&on_sale=true'");
    println!("    curl 'http://127.0.0.1:3000/products?brands=7&newest=true&limit=2'");
    println!();

    builder.serve(None).await
}

/// Drive the engine the way a product list screen would
async fn demo_filter_engine(products: Vec<Product>) {
    let sink = BroadcastSink::new(8);
    let mut views = sink.subscribe();
    let mut engine = CatalogFilterEngine::with_sink(products, sink);

    engine.recompute();
    engine.set_search_term("mug");
    engine.recompute();
    engine.clear_all();
    engine.set_show_on_sale(true);
    engine.set_sort_newest_first(true);
    engine.recompute();

    while let Ok(view) = views.try_recv() {
        let names: Vec<&str> = view.products.iter().map(|p| p.name.as_str()).collect();
        println!("👀 View {} at {}: {:?}", view.id, view.timestamp, names);
    }

    let facets = engine.facets();
    println!(
        "🏷️  {} brands, {} suppliers, prices {:.2}..={:.2}",
        facets.brands.len(),
        facets.suppliers.len(),
        facets.price_bounds.min(),
        facets.price_bounds.max()
    );
}

fn sample_catalog() -> Vec<Product> {
    Product::list_from_json(vec![
        json!({
            "id": 1, "name": "Personalised Photo Mug",
            "salePriceIncTax": "14.90", "costIncTax": "19.90",
            "customize": true, "customizationCount": 12,
            "createdAt": "2024-04-02",
            "brand": {"id": 7, "name": "Keepsake Co"}, "supplier": {"id": 1, "name": "PrintHub"}
        }),
        json!({
            "id": 2, "name": "Engraved Cufflinks",
            "salePriceIncTax": 65, "costIncTax": 65,
            "customize": true, "customizationCount": 3,
            "createdAt": "2023-10-18",
            "brand": {"id": 9, "name": "Argent"}, "supplier": {"id": 2, "name": "Metalcraft"}
        }),
        json!({
            "id": 3, "name": "Artisan Chocolate Box",
            "salePriceIncTax": 32.5, "costIncTax": 38,
            "createdAt": "2024-06-11T10:30:00Z",
            "brand": {"id": 4, "name": "Cacao & Co"}
        }),
        json!({
            "id": 4, "name": "Travel Mug",
            "salePriceIncTax": "21",
            "brand": {"id": 7, "name": "Keepsake Co"}, "supplier": {"id": 1, "name": "PrintHub"}
        }),
    ])
}
