//! Integration tests for `CatalogClient::search_products`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use upsell_catalog::{CatalogClient, CatalogError, CatalogSource};

const SEARCH_PATH: &str = "/task/products/search";

fn test_client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(
        &format!("{}{SEARCH_PATH}", server.uri()),
        "test-key",
        5,
        "upsell-test/0.1",
    )
    .expect("failed to build test CatalogClient")
}

fn towel_json() -> serde_json::Value {
    json!([{
        "id": 77,
        "title": "Fog Linen Chambray Towel - Beige Stripe",
        "variants": [
            {"id": 1, "product_id": 77, "title": "XS / Silver", "price": "49"},
            {"id": 2, "product_id": 77, "title": "S / Silver", "price": "49"}
        ],
        "image": {"id": 266, "product_id": 77, "src": "https://cdn.example.com/77.jpg"}
    }])
}

#[tokio::test]
async fn search_sends_term_and_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("search", "towel"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(towel_json()))
        .expect(1)
        .mount(&server)
        .await;

    let items = test_client(&server)
        .search_products("towel")
        .await
        .expect("search should succeed");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 77);
    assert_eq!(items[0].variants.len(), 2);
    assert_eq!(
        items[0].image.as_ref().map(|i| i.src.as_str()),
        Some("https://cdn.example.com/77.jpg")
    );
}

#[tokio::test]
async fn search_through_catalog_source_trait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(towel_json()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let items = CatalogSource::search(&client, "").await.unwrap();
    assert_eq!(items[0].title, "Fog Linen Chambray Towel - Beige Stripe");
}

#[tokio::test]
async fn null_body_yields_no_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let items = test_client(&server).search_products("nothing").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn unauthorized_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let result = test_client(&server).search_products("towel").await;
    assert!(
        matches!(result, Err(CatalogError::Unauthorized { status: 401 })),
        "expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_reads_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;

    let result = test_client(&server).search_products("towel").await;
    assert!(
        matches!(
            result,
            Err(CatalogError::RateLimited {
                retry_after_secs: 12
            })
        ),
        "expected RateLimited(12), got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_carries_body_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"message":"boom"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server).search_products("towel").await;
    match result {
        Err(CatalogError::UnexpectedStatus { status, body, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(body, r#"{"message":"boom"}"#);
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let result = test_client(&server).search_products("towel").await;
    assert!(
        matches!(result, Err(CatalogError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn retries_after_503_and_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(towel_json()))
        .mount(&server)
        .await;

    let client = test_client(&server).with_retry(1, 0);
    let items = client.search_products("towel").await.expect("retry should recover");
    assert_eq!(items[0].id, 77);
}

#[tokio::test]
async fn default_client_does_not_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server).search_products("towel").await;
    assert!(matches!(
        result,
        Err(CatalogError::UnexpectedStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn gives_up_after_exhausting_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3) // 1 initial + 2 retries
        .mount(&server)
        .await;

    let client = test_client(&server).with_retry(2, 0);
    let result = client.search_products("towel").await;
    assert!(matches!(result, Err(CatalogError::RateLimited { .. })));
}
