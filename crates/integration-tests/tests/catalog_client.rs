//! Integration tests for the catalog HTTP client.
//!
//! These tests run the real `reqwest` client against a local server and
//! check decoding and the error taxonomy.

use axum::http::StatusCode;
use pocket_shop_core::ProductId;
use pocket_shop_storefront::catalog::{CatalogClient, CatalogError, CatalogSource};
use pocket_shop_storefront::config::CatalogConfig;
use serde_json::json;

use pocket_shop_integration_tests::{
    Reply, catalog_json, product_json, sample_catalog, spawn_catalog_server, unreachable_url,
};

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_fetch_decodes_products_in_order() {
    let server = spawn_catalog_server(vec![Reply::json(&sample_catalog())]).await;
    let client = CatalogClient::new(&server.config()).expect("client");

    let page = client.get_products().await.expect("fetch");

    let ids: Vec<ProductId> = page.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProductId::new(1), ProductId::new(2), ProductId::new(3)]);
    assert_eq!(page.total, 3);
    assert_eq!(page.limit, 30);

    let first = page.products.first().expect("products not empty");
    assert_eq!(first.brand, "Acme");
    assert_eq!(first.price.to_string(), "$549.00");
    assert_eq!(first.lead_image(), Some("https://cdn.example.com/1/1.png"));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_fetch_through_trait() {
    let server = spawn_catalog_server(vec![Reply::json(&sample_catalog())]).await;
    let client = CatalogClient::new(&server.config()).expect("client");

    let page = client.fetch_catalog().await.expect("fetch");
    assert_eq!(page.products.len(), 3);
}

#[tokio::test]
async fn test_fetch_tolerates_sparse_products() {
    let body = catalog_json(vec![json!({"id": 7, "title": "Mystery box"})]);
    let server = spawn_catalog_server(vec![Reply::json(&body)]).await;
    let client = CatalogClient::new(&server.config()).expect("client");

    let page = client.get_products().await.expect("fetch");
    let product = page.products.first().expect("one product");
    assert!(product.brand.is_empty());
    assert!(product.images.is_empty());
}

#[tokio::test]
async fn test_fetch_keeps_products_with_null_fields() {
    let body = catalog_json(vec![
        product_json(1, "Phone X", "Flagship handset", 549.0),
        json!({"id": 2, "title": "Phone Y", "brand": null, "description": null, "images": null}),
        product_json(3, "Tablet Z", "Ten inch tablet", 329.5),
    ]);
    let server = spawn_catalog_server(vec![Reply::json(&body)]).await;
    let client = CatalogClient::new(&server.config()).expect("client");

    let page = client.get_products().await.expect("fetch");

    let ids: Vec<ProductId> = page.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProductId::new(1), ProductId::new(2), ProductId::new(3)]);
    let sparse = page.products.get(1).expect("second product");
    assert!(sparse.brand.is_empty());
    assert!(sparse.description.is_empty());
    assert_eq!(sparse.lead_image(), None);
}

#[tokio::test]
async fn test_fetch_with_timeout_configured() {
    let server = spawn_catalog_server(vec![Reply::json(&sample_catalog())]).await;
    let config = CatalogConfig {
        timeout: Some(std::time::Duration::from_secs(5)),
        ..server.config()
    };
    let client = CatalogClient::new(&config).expect("client");

    assert!(client.get_products().await.is_ok());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_server_error_status() {
    let server =
        spawn_catalog_server(vec![Reply::raw(StatusCode::INTERNAL_SERVER_ERROR, "boom")]).await;
    let client = CatalogClient::new(&server.config()).expect("client");

    let err = client.get_products().await.expect_err("should fail");
    assert!(matches!(err, CatalogError::Status(500)));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = spawn_catalog_server(vec![Reply::raw(StatusCode::OK, "{\"products\": 5}")]).await;
    let client = CatalogClient::new(&server.config()).expect("client");

    let err = client.get_products().await.expect_err("should fail");
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    let config = CatalogConfig::new(unreachable_url().await);
    let client = CatalogClient::new(&config).expect("client");

    let err = client.get_products().await.expect_err("should fail");
    assert!(matches!(err, CatalogError::Http(_)));
}
