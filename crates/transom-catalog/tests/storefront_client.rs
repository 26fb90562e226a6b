//! Integration tests for `StorefrontClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the paginated catalog fetch (happy paths
//! and every error variant it can propagate), the retry policy, and the
//! checkout / newsletter / inventory proxy calls.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use transom_catalog::{CatalogError, CheckoutItem, CheckoutRequest, StorefrontClient};

/// Builds a `StorefrontClient` suitable for tests: 5-second timeout,
/// descriptive UA, no retries.
fn test_client(base_url: &str) -> StorefrontClient {
    StorefrontClient::new(base_url, None, 5, "transom-test/0.1", 0, 0)
        .expect("failed to build test StorefrontClient")
}

/// Builds a `StorefrontClient` with retries enabled for retry-specific tests.
fn test_client_with_retries(
    base_url: &str,
    max_retries: u32,
    backoff_base_secs: u64,
) -> StorefrontClient {
    StorefrontClient::new(base_url, None, 5, "transom-test/0.1", max_retries, backoff_base_secs)
        .expect("failed to build test StorefrontClient")
}

/// Minimal valid one-product JSON fixture.
fn one_product_json(id: i64) -> serde_json::Value {
    json!({
        "products": [{
            "id": id,
            "title": "Tohatsu MFS25C 25hp EFI Outboard",
            "handle": "tohatsu-mfs25c-efi",
            "brand": "Tohatsu",
            "productType": "Outboard Motors",
            "condition": "new",
            "horsepower": 25.0,
            "published": true,
            "tags": ["efi"],
            "specs": {"Cooling": "Water Cooled"},
            "variants": [{
                "id": 101,
                "title": "20\" Long",
                "sku": "3DP-MFS25-EL",
                "price": "4299.00",
                "compareAtPrice": null,
                "available": true,
                "position": 1
            }]
        }]
    })
}

// ---------------------------------------------------------------------------
// Catalog fetch – happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_returns_empty_vec_when_response_has_no_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"products": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(
        result.unwrap().is_empty(),
        "expected empty Vec when server returns no products"
    );
}

#[tokio::test]
async fn fetch_all_products_returns_all_products_on_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&one_product_json(1)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let products = result.unwrap();
    assert_eq!(products.len(), 1, "expected exactly 1 product");
    assert_eq!(products[0].id, 1, "expected product id 1");
}

#[tokio::test]
async fn fetch_all_products_follows_pagination_across_multiple_pages() {
    let server = MockServer::start().await;

    // Page 1: returns product id=1 plus a Link header pointing to page 2.
    let next_link = format!(
        "<{base}/api/products.json?limit=250&cursor=cursor2>; rel=\"next\"",
        base = server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        // Match only requests WITHOUT a cursor query param (first page).
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&one_product_json(1))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;

    // Page 2: returns product id=2, no Link header (last page).
    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .and(query_param("cursor", "cursor2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&one_product_json(2)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let products = result.unwrap();
    assert_eq!(products.len(), 2, "expected 2 products across 2 pages");
    assert_eq!(products[0].id, 1, "first product should have id 1");
    assert_eq!(products[1].id, 2, "second product should have id 2");

    // Variant data survives the page boundary.
    assert!(!products[0].variants.is_empty());
    assert!(!products[1].variants.is_empty());
}

// ---------------------------------------------------------------------------
// Catalog fetch – error taxonomy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_propagates_rate_limit_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_err(), "expected Err for 429 response");
    match result.unwrap_err() {
        CatalogError::RateLimited { retry_after_secs } => {
            assert_eq!(
                retry_after_secs, 30,
                "retry_after_secs should match Retry-After header"
            );
        }
        other => panic!("expected CatalogError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_products_rate_limit_without_retry_after_defaults_to_60s() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_err(), "expected Err for 429 response");
    match result.unwrap_err() {
        CatalogError::RateLimited { retry_after_secs } => {
            assert_eq!(retry_after_secs, 60, "expected default Retry-After of 60s");
        }
        other => panic!("expected CatalogError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_products_propagates_not_found_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_err(), "expected Err for 404 response");
    assert!(
        matches!(result.unwrap_err(), CatalogError::NotFound { .. }),
        "expected CatalogError::NotFound"
    );
}

#[tokio::test]
async fn fetch_all_products_propagates_unexpected_status_error_for_5xx() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_err(), "expected Err for 503 response");
    match result.unwrap_err() {
        CatalogError::UnexpectedStatus { status, .. } => {
            assert_eq!(status, 503);
        }
        other => panic!("expected CatalogError::UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_products_second_page_failure_discards_first_page() {
    let server = MockServer::start().await;

    let next_link = format!(
        "<{base}/api/products.json?limit=250&cursor=cursor_fail>; rel=\"next\"",
        base = server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&one_product_json(1))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .and(query_param("cursor", "cursor_fail"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    // All-or-nothing: page 1's product must not leak out.
    assert!(result.is_err(), "expected Err when page 2 returns 404");
    assert!(
        matches!(result.unwrap_err(), CatalogError::NotFound { .. }),
        "expected CatalogError::NotFound from page 2 failure"
    );
}

#[tokio::test]
async fn fetch_all_products_stops_at_pagination_limit() {
    let server = MockServer::start().await;

    // Every page links to another page, so the client would loop forever
    // without the page cap.
    let next_link = format!(
        "<{base}/api/products.json?limit=250&cursor=again>; rel=\"next\"",
        base = server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({"products": []}))
                .insert_header("Link", next_link.as_str()),
        )
        .expect(200)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_err(), "expected Err once the page cap is hit");
    match result.unwrap_err() {
        CatalogError::PaginationLimit { max_pages } => {
            assert_eq!(max_pages, 200, "page cap should be 200");
        }
        other => panic!("expected CatalogError::PaginationLimit, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_products_propagates_malformed_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_err(), "expected Err for malformed JSON response");
    assert!(
        matches!(result.unwrap_err(), CatalogError::Deserialize { .. }),
        "expected CatalogError::Deserialize"
    );
}

// ---------------------------------------------------------------------------
// Catalog fetch – retry policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_retries_after_429_and_succeeds() {
    let server = MockServer::start().await;

    // First request returns 429 (served once).
    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    // Second request returns 200 with one product.
    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&one_product_json(42)))
        .mount(&server)
        .await;

    // Client with 1 retry and 0-second backoff (so the test doesn't sleep).
    let client = test_client_with_retries(&server.uri(), 1, 0);
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_ok(), "expected Ok after retry, got: {result:?}");
    let products = result.unwrap();
    assert_eq!(products.len(), 1, "expected 1 product after successful retry");
    assert_eq!(products[0].id, 42, "expected product id 42");
}

#[tokio::test]
async fn fetch_all_products_returns_error_after_exhausting_retries() {
    let server = MockServer::start().await;

    // Server always returns 429 with Retry-After: 0 so the test doesn't sleep.
    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2) // 1 initial + 1 retry = 2 total requests
        .mount(&server)
        .await;

    // max_retries=1, backoff_base_secs=0 → 2 total attempts, no sleeping.
    let client = test_client_with_retries(&server.uri(), 1, 0);
    let result = client.fetch_all_products(250, 0).await;

    assert!(
        result.is_err(),
        "expected Err after exhausting retries, got: {result:?}"
    );
    assert!(
        matches!(result.unwrap_err(), CatalogError::RateLimited { .. }),
        "expected CatalogError::RateLimited after retry exhaustion"
    );
}

#[tokio::test]
async fn fetch_all_products_retries_after_503_and_succeeds() {
    let server = MockServer::start().await;

    // First request returns 503 (served once).
    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    // Second request returns 200 with one product.
    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&one_product_json(77)))
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server.uri(), 1, 0);
    let result = client.fetch_all_products(250, 0).await;

    assert!(result.is_ok(), "expected Ok after 503 retry, got: {result:?}");
    let products = result.unwrap();
    assert_eq!(products.len(), 1, "expected 1 product after successful retry");
    assert_eq!(products[0].id, 77, "expected product id 77");
}

// ---------------------------------------------------------------------------
// Bearer token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bearer_token_is_attached_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .and(header("authorization", "Bearer storefront-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"products": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = StorefrontClient::new(
        &server.uri(),
        Some("storefront-token"),
        5,
        "transom-test/0.1",
        0,
        0,
    )
    .expect("failed to build test StorefrontClient");

    let result = client.fetch_all_products(250, 0).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

// ---------------------------------------------------------------------------
// Checkout proxy
// ---------------------------------------------------------------------------

fn checkout_request() -> CheckoutRequest {
    CheckoutRequest {
        items: vec![CheckoutItem {
            variant_id: "101".to_owned(),
            quantity: 1,
        }],
    }
}

#[tokio::test]
async fn create_checkout_returns_checkout_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/checkouts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "id": "chk_9f3b",
            "webUrl": "https://checkout.example.com/chk_9f3b",
            "totalPrice": "4299.00"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.create_checkout(&checkout_request()).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let checkout = result.unwrap();
    assert_eq!(checkout.id, "chk_9f3b");
    assert_eq!(checkout.web_url, "https://checkout.example.com/chk_9f3b");
    assert_eq!(checkout.total_price.as_deref(), Some("4299.00"));
}

#[tokio::test]
async fn create_checkout_maps_backend_rejection_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/checkouts.json"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.create_checkout(&checkout_request()).await;

    assert!(result.is_err(), "expected Err for 422 response");
    assert!(
        matches!(
            result.unwrap_err(),
            CatalogError::UnexpectedStatus { status: 422, .. }
        ),
        "expected CatalogError::UnexpectedStatus with status 422"
    );
}

#[tokio::test]
async fn create_checkout_is_never_retried() {
    let server = MockServer::start().await;

    // Even with retries configured, the POST must be attempted exactly once.
    Mock::given(method("POST"))
        .and(path("/api/checkouts.json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server.uri(), 3, 0);
    let result = client.create_checkout(&checkout_request()).await;

    assert!(result.is_err(), "expected Err for 503 response");
    assert!(
        matches!(
            result.unwrap_err(),
            CatalogError::UnexpectedStatus { status: 503, .. }
        ),
        "expected CatalogError::UnexpectedStatus with status 503"
    );
    // Mock::expect(1) verifies on drop that no retry happened.
}

// ---------------------------------------------------------------------------
// Newsletter proxy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscribe_newsletter_posts_email_and_parses_ack() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/newsletter/subscriptions.json"))
        .and(wiremock::matchers::body_json(
            &json!({"email": "skipper@example.com"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "email": "skipper@example.com",
            "subscribed": true
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.subscribe_newsletter("skipper@example.com").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let ack = result.unwrap();
    assert_eq!(ack.email, "skipper@example.com");
    assert!(ack.subscribed);
}

// ---------------------------------------------------------------------------
// Inventory proxy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn inventory_levels_queries_by_handle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inventory.json"))
        .and(query_param("handle", "tohatsu-mfs25c-efi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "levels": [
                {"variantId": 101, "sku": "3DP-MFS25-EL", "quantity": 3, "location": "Showroom"},
                {"variantId": 102, "sku": "3DP-MFS25-ES", "quantity": 0, "location": "Showroom"}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.inventory_levels("tohatsu-mfs25c-efi").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let levels = result.unwrap();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].variant_id, 101);
    assert_eq!(levels[0].quantity, 3);
    assert_eq!(levels[1].quantity, 0);
}

#[tokio::test]
async fn inventory_levels_propagates_not_found_for_unknown_handle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inventory.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.inventory_levels("no-such-handle").await;

    assert!(result.is_err(), "expected Err for 404 response");
    assert!(
        matches!(result.unwrap_err(), CatalogError::NotFound { .. }),
        "expected CatalogError::NotFound"
    );
}
