//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles against the router for each cache strategy.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mini_catalog::{api::create_router, AppState, CacheStrategy, Catalog};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

const STRATEGIES: [CacheStrategy; 3] =
    [CacheStrategy::None, CacheStrategy::Lru, CacheStrategy::Memo];

fn create_test_app(strategy: CacheStrategy) -> Router {
    create_router(AppState::new(Catalog::new(strategy, 100)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn seed_grocery(app: &Router) {
    let (status, _) = send(
        app,
        "POST",
        "/categories",
        Some(json!({"id": 1, "name": "Grocery"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/products",
        Some(json!({
            "id": 1,
            "name": "Milk",
            "price": 3.5,
            "description": "dairy",
            "category_id": 1,
            "quantity": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// == Walkthrough ==

#[tokio::test]
async fn test_price_update_walkthrough_all_strategies() {
    for strategy in STRATEGIES {
        let app = create_test_app(strategy);
        seed_grocery(&app).await;

        let (status, json) = send(&app, "GET", "/categories/1/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 1);
        assert_eq!(json["results"][0]["id"], 1);

        let (_, json) = send(&app, "GET", "/products/price-range?min=3.0&max=3.9", None).await;
        assert_eq!(json["count"], 1);

        let (status, _) = send(&app, "PATCH", "/products/1", Some(json!({"price": 4.0}))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = send(&app, "GET", "/products/price-range?min=3.0&max=3.9", None).await;
        assert_eq!(json["count"], 0, "stale price range under {}", strategy);

        let (status, json) = send(&app, "GET", "/products/1/price-history", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["history"].as_array().unwrap().len(), 2);
        assert_eq!(json["history"][1]["price"], 4.0);
    }
}

// == Category Endpoints ==

#[tokio::test]
async fn test_category_crud() {
    let app = create_test_app(CacheStrategy::Lru);
    seed_grocery(&app).await;

    let (status, json) = send(&app, "GET", "/categories/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Grocery");
    assert_eq!(json["status"], true);

    let (status, _) = send(
        &app,
        "PATCH",
        "/categories/1",
        Some(json!({"status": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, "GET", "/categories/1", None).await;
    assert_eq!(json["name"], "Grocery");
    assert_eq!(json["status"], false);

    let (_, json) = send(&app, "GET", "/categories/search?name=GROC", None).await;
    assert_eq!(json["count"], 1);
}

#[tokio::test]
async fn test_duplicate_category_conflict() {
    let app = create_test_app(CacheStrategy::Memo);
    seed_grocery(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        "/categories",
        Some(json!({"id": 1, "name": "Again"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_delete_referenced_category_conflict() {
    let app = create_test_app(CacheStrategy::Lru);
    seed_grocery(&app).await;

    let (status, _) = send(&app, "DELETE", "/categories/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "DELETE", "/products/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/categories/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/categories/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Product Endpoints ==

#[tokio::test]
async fn test_product_unknown_category() {
    let app = create_test_app(CacheStrategy::Lru);
    seed_grocery(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"id": 2, "name": "Rake", "price": 20.0, "category_id": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "PATCH", "/products/1", Some(json!({"category_id": 9}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, json) = send(&app, "GET", "/products/1", None).await;
    assert_eq!(json["category_id"], 1);
}

#[tokio::test]
async fn test_negative_price_rejected() {
    let app = create_test_app(CacheStrategy::Lru);
    seed_grocery(&app).await;

    let (status, _) = send(&app, "PATCH", "/products/1", Some(json!({"price": -2.0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_adjust_quantity_endpoint() {
    let app = create_test_app(CacheStrategy::Memo);
    seed_grocery(&app).await;

    let (status, json) = send(&app, "POST", "/products/1/quantity", Some(json!({"delta": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["quantity"], 15);

    let (status, _) = send(&app, "POST", "/products/1/quantity", Some(json!({"delta": -16}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, json) = send(&app, "GET", "/products/1", None).await;
    assert_eq!(json["quantity"], 15);
}

#[tokio::test]
async fn test_missing_product_not_found() {
    let app = create_test_app(CacheStrategy::None);

    for (method, uri) in [
        ("GET", "/products/7"),
        ("DELETE", "/products/7"),
        ("GET", "/products/7/price-history"),
    ] {
        let (status, json) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert!(json.get("error").is_some());
    }
}

#[tokio::test]
async fn test_malformed_input_is_bad_request() {
    let app = create_test_app(CacheStrategy::Lru);
    seed_grocery(&app).await;

    let negative_quantity = json!({
        "id": 2,
        "name": "Bread",
        "price": 2.0,
        "category_id": 1,
        "quantity": -5
    });
    let (status, json) = send(&app, "POST", "/products", Some(negative_quantity)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));

    let cases = [
        ("GET", "/products/abc", None),
        ("GET", "/categories/abc", None),
        ("PATCH", "/products/abc", Some(json!({"price": 1.0}))),
        ("GET", "/products/price-range?min=1", None),
        ("GET", "/products/price-range?min=cheap&max=2", None),
        ("POST", "/products/1/quantity", Some(json!({"delta": "lots"}))),
    ];
    for (method, uri, body) in cases {
        let (status, json) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert!(json["error"].is_string(), "{} {}", method, uri);
    }

    let (status, _) = send(&app, "GET", "/products/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, json) = send(&app, "GET", "/products/1", None).await;
    assert_eq!(json["quantity"], 10);
}

// == Search Endpoints ==

#[tokio::test]
async fn test_search_by_category_name_follows_rename() {
    for strategy in STRATEGIES {
        let app = create_test_app(strategy);
        seed_grocery(&app).await;

        let (_, json) = send(&app, "GET", "/products/by-category?name=grocery", None).await;
        assert_eq!(json["count"], 1);

        send(
            &app,
            "PATCH",
            "/categories/1",
            Some(json!({"name": "Dairy"})),
        )
        .await;

        let (_, json) = send(&app, "GET", "/products/by-category?name=grocery", None).await;
        assert_eq!(json["count"], 0);
        let (_, json) = send(&app, "GET", "/products/search?name=MILK", None).await;
        assert_eq!(json["count"], 1);
    }
}

// == Stats Endpoint ==

#[tokio::test]
async fn test_stats_track_hits_and_invalidations() {
    let app = create_test_app(CacheStrategy::Lru);
    seed_grocery(&app).await;

    send(&app, "GET", "/products/search?name=milk", None).await;
    send(&app, "GET", "/products/search?name=milk", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["strategy"], "lru");
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["invalidations"], 2);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["products"], 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(CacheStrategy::None);

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}
