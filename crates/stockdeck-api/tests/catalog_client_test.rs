// Integration tests for `CatalogClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockdeck_api::{CatalogClient, Error, ProductBody, ProductPatch};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let client = CatalogClient::from_reqwest(&server.uri(), reqwest::Client::new())
        .expect("mock server uri should parse");
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products_sends_limit() {
    let (server, client) = setup().await;

    let body = json!({
        "products": [
            { "id": 1, "title": "Apple", "price": 3, "stock": 10, "category": "fruit" },
            { "id": 2, "title": "Banana", "price": "1.50", "stock": 40, "category": "fruit" },
        ],
        "total": 2,
        "skip": 0,
        "limit": 100
    });

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let products = client.list_products(100).await.expect("list should succeed");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].title.as_deref(), Some("Apple"));
    // The client does not coerce -- string prices survive to the boundary.
    assert_eq!(products[1].price.as_ref().and_then(|v| v.as_str()), Some("1.50"));
}

#[tokio::test]
async fn test_list_products_tolerates_missing_products_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0 })))
        .mount(&server)
        .await;

    let products = client.list_products(50).await.expect("list should succeed");
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_create_product_posts_full_body() {
    let (server, client) = setup().await;

    let body = ProductBody {
        title: "Widget".into(),
        price: 9.99,
        stock: 5,
        category: "tools".into(),
        thumbnail: String::new(),
    };

    Mock::given(method("POST"))
        .and(path("/products/add"))
        .and(body_json(json!({
            "title": "Widget",
            "price": 9.99,
            "stock": 5,
            "category": "tools",
            "thumbnail": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 101 })))
        .mount(&server)
        .await;

    let created = client.create_product(&body).await.expect("create should succeed");
    assert_eq!(created.id.and_then(|v| v.as_u64()), Some(101));
}

#[tokio::test]
async fn test_update_product_sends_only_provided_fields() {
    let (server, client) = setup().await;

    let patch = ProductPatch {
        price: Some(15.0),
        ..ProductPatch::default()
    };

    Mock::given(method("PUT"))
        .and(path("/products/42"))
        .and(body_json(json!({ "price": 15.0 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 42, "title": "Lamp", "price": 15.0 })),
        )
        .mount(&server)
        .await;

    let updated = client.update_product("42", &patch).await.expect("update should succeed");
    assert_eq!(updated.title.as_deref(), Some("Lamp"));
}

#[tokio::test]
async fn test_delete_product() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/products/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "isDeleted": true })),
        )
        .mount(&server)
        .await;

    client.delete_product("7").await.expect("delete should succeed");
}

// ── Failure mapping ─────────────────────────────────────────────────

#[tokio::test]
async fn test_non_2xx_maps_to_api_error_with_context_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "server detail" })),
        )
        .mount(&server)
        .await;

    let err = client.list_products(100).await.expect_err("should fail");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            // Context-derived, not the server body.
            assert_eq!(message, "failed to fetch product catalog");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_404_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.delete_product("999").await.expect_err("should fail");
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_malformed_body_maps_to_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.list_products(100).await.expect_err("should fail");
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}
