//! Tests for the REST-backed catalog source against a local axum backend
#![cfg(feature = "http")]

use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::{Json, Router, routing::get};
use giftshop::config::ApiConfig;
use giftshop::prelude::*;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral port and return its base URL
async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn api_config(base_url: String, token: Option<&str>) -> ApiConfig {
    ApiConfig {
        base_url,
        token: token.map(str::to_string),
        timeout_seconds: 5,
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn test_fetches_bare_array() {
    let app = Router::new().route(
        "/products",
        get(|| async {
            Json(json!([
                {"id": 1, "name": "Wooden Puzzle", "salePriceIncTax": "24.00"},
                {"id": 2, "name": "Scented Soap", "salePriceIncTax": 6}
            ]))
        }),
    );
    let base = spawn_backend(app).await;

    let source = HttpCatalogSource::new(&api_config(base, None)).unwrap();
    let products = source.fetch_products().await.unwrap();

    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Wooden Puzzle", "Scented Soap"]);
    assert_eq!(products[0].sale_price_inc_tax, 24.0);
}

#[tokio::test]
async fn test_fetches_enveloped_list_and_skips_records_without_id() {
    let app = Router::new().route(
        "/products",
        get(|| async {
            Json(json!({
                "data": [
                    {"id": "a1", "name": "Gift Card"},
                    {"name": "orphan record"}
                ],
                "meta": {"total": 2}
            }))
        }),
    );
    let base = spawn_backend(app).await;

    let source = HttpCatalogSource::new(&api_config(base, None)).unwrap();
    let products = source.fetch_products().await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, EntityId::from("a1"));
}

#[tokio::test]
async fn test_sends_bearer_token() {
    let app = Router::new().route(
        "/products",
        get(|headers: HeaderMap| async move {
            match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
                Some("Bearer opaque-token") => (StatusCode::OK, Json(json!([]))),
                _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"}))),
            }
        }),
    );
    let base = spawn_backend(app).await;

    let authorized = HttpCatalogSource::new(&api_config(base.clone(), Some("opaque-token"))).unwrap();
    assert!(authorized.fetch_products().await.unwrap().is_empty());

    let anonymous = HttpCatalogSource::new(&api_config(base, None)).unwrap();
    let err = anonymous.fetch_products().await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Fetch(FetchError::Status { status: 401, .. })
    ));
}

#[tokio::test]
async fn test_server_error_maps_to_status_error() {
    let app = Router::new().route(
        "/products",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_backend(app).await;

    let source = HttpCatalogSource::new(&api_config(base, None)).unwrap();
    let err = source.fetch_products().await.unwrap_err();

    assert_eq!(err.error_code(), "CATALOG_UPSTREAM_STATUS");
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let app = Router::new().route("/products", get(|| async { "<html>maintenance</html>" }));
    let base = spawn_backend(app).await;

    let source = HttpCatalogSource::new(&api_config(base, None)).unwrap();
    let err = source.fetch_products().await.unwrap_err();

    assert!(matches!(err, CatalogError::Fetch(FetchError::Decode { .. })));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind then drop to obtain a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpCatalogSource::new(&api_config(format!("http://{addr}"), None)).unwrap();
    let err = source.fetch_products().await.unwrap_err();

    assert_eq!(err.error_code(), "CATALOG_UNREACHABLE");
}

#[tokio::test]
async fn test_cached_http_source_fetches_once() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/products",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json::<Value>(json!([{"id": 1, "name": "Tea Sampler", "salePriceIncTax": 19}]))
            }
        }),
    );
    let base = spawn_backend(app).await;

    let source = CachedSource::new(
        HttpCatalogSource::new(&api_config(base, None)).unwrap(),
        Arc::new(InMemoryCache::new()),
        "giftshop.products",
        TtlPolicy::new(Duration::from_secs(60)),
    );

    for _ in 0..3 {
        assert_eq!(source.fetch_products().await.unwrap()[0].name, "Tea Sampler");
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
