//! Integration tests for `ProductStore` load semantics against a mocked
//! backend: the one-shot lifecycle, publication/category filtering, and
//! terminal failure behavior.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use transom_catalog::{ProductStore, StorefrontClient};

fn test_client(base_url: &str) -> StorefrontClient {
    StorefrontClient::new(base_url, None, 5, "transom-test/0.1", 0, 0)
        .expect("failed to build test StorefrontClient")
}

fn catalog_json() -> serde_json::Value {
    json!({
        "products": [
            {
                "id": 1,
                "title": "Tohatsu MFS25C 25hp EFI Outboard",
                "handle": "tohatsu-mfs25c-efi",
                "productType": "Outboard Motors",
                "published": true,
                "variants": [{"id": 11, "title": "20\" Long", "price": "4299.00"}]
            },
            {
                "id": 2,
                "title": "Retired Listing",
                "handle": "retired-listing",
                "productType": "Outboard Motors",
                "published": false,
                "variants": [{"id": 21, "title": "Default Title", "price": "1.00"}]
            },
            {
                "id": 3,
                "title": "Solas Amita 3 Propeller",
                "handle": "solas-amita-3",
                "productType": "Parts & Accessories",
                "published": true,
                "variants": [{"id": 31, "title": "Default Title", "price": "89.00"}]
            },
            {
                "id": 4,
                "title": "Import Error Listing",
                "handle": "import-error",
                "productType": "Outboard Motors",
                "published": true,
                "variants": []
            }
        ]
    })
}

#[tokio::test]
async fn load_keeps_published_products_and_skips_unnormalizable_ones() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&catalog_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut store = ProductStore::new(250, 0);
    store.load(&client).await;

    assert!(store.error().is_none(), "expected no error");
    assert!(!store.is_loading());

    let handles: Vec<_> = store.products().iter().map(|p| p.handle.as_str()).collect();
    // Unpublished (id 2) and variantless (id 4) listings are gone.
    assert_eq!(handles, vec!["tohatsu-mfs25c-efi", "solas-amita-3"]);
}

#[tokio::test]
async fn category_scoped_store_keeps_only_matching_product_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&catalog_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut store = ProductStore::for_category("parts & accessories", 250, 0);
    store.load(&client).await;

    let handles: Vec<_> = store.products().iter().map(|p| p.handle.as_str()).collect();
    assert_eq!(handles, vec!["solas-amita-3"]);
}

#[tokio::test]
async fn failed_load_is_terminal_and_reports_one_message() {
    let server = MockServer::start().await;

    // Exactly one request: the second `load` call must not hit the server.
    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut store = ProductStore::new(250, 0);

    store.load(&client).await;
    assert!(store.products().is_empty());
    let first_error = store.error().map(str::to_owned);
    assert!(first_error.is_some(), "expected an error message");

    // A second load on a failed store is a no-op.
    store.load(&client).await;
    assert_eq!(store.error(), first_error.as_deref());
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn successful_load_is_not_refetched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&catalog_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut store = ProductStore::new(250, 0);

    store.load(&client).await;
    let count = store.products().len();
    assert!(count > 0);

    store.load(&client).await;
    assert_eq!(store.products().len(), count);
}

#[tokio::test]
async fn fresh_store_retries_where_failed_store_would_not() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&catalog_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let mut failed_store = ProductStore::new(250, 0);
    failed_store.load(&client).await;
    assert!(failed_store.error().is_some());

    // The failed store stays failed; a new store gets the fresh fetch.
    let mut fresh_store = ProductStore::new(250, 0);
    fresh_store.load(&client).await;
    assert!(fresh_store.error().is_none());
    assert!(!fresh_store.products().is_empty());
}
