use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;

use storefront::{
    api::{create_router, AppState},
    catalog::Catalog,
    models::Product,
};

fn catalog() -> Catalog {
    Catalog::from_products(vec![
        Product::new("Red Shoe", "red shoe leather").with_brand("Acme"),
        Product::new("Blue Shoe", "blue shoe leather").with_brand("Acme"),
        Product::new("Red Hat", "red hat cotton").with_brand("Hatco"),
    ])
}

fn trending() -> Catalog {
    let products = (1..=10)
        .map(|i| Product::new(format!("Trending product number {} with a long name", i), "tag"))
        .collect();
    Catalog::from_products(products)
}

fn create_test_server() -> TestServer {
    let state = AppState::in_memory(catalog(), trending());
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("7b0c1a2e-3f4d-4e5f-8a9b-0c1d2e3f4a5b"),
        )
        .await;
    assert_eq!(
        response.header("x-request-id"),
        "7b0c1a2e-3f4d-4e5f-8a9b-0c1d2e3f4a5b"
    );
}

#[tokio::test]
async fn test_trending_shows_first_eight() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 8);
    assert_eq!(
        products[0]["name"],
        "Trending product number 1 with a long name"
    );
    assert_eq!(products[0]["display_name"], "Trending product number 1 with...");
    assert!(products[0]["display_image_url"]
        .as_str()
        .unwrap()
        .starts_with("static/img/img_"));
    assert!(body["price"].as_u64().is_some());
}

#[tokio::test]
async fn test_recommendations_ranked() {
    let server = create_test_server();
    let response = server
        .post("/recommendations")
        .json(&json!({ "prod": "Red Shoe", "nbr": 2 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let names: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Blue Shoe", "Red Hat"]);
    assert!(body["message"].is_null());
}

#[tokio::test]
async fn test_recommendations_accepts_numeric_string() {
    let server = create_test_server();
    let response = server
        .post("/recommendations")
        .json(&json!({ "prod": "Red Hat", "nbr": "1" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_recommendations_unknown_product() {
    let server = create_test_server();
    let response = server
        .post("/recommendations")
        .json(&json!({ "prod": "Green Sock", "nbr": 5 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(body["recommendations"].as_array().unwrap().is_empty());
    assert_eq!(body["message"], "No recommendations available.");
}

#[tokio::test]
async fn test_recommendations_invalid_count() {
    let server = create_test_server();
    for nbr in [
        json!(0),
        json!(-4),
        json!("ten"),
        json!(null),
        json!(true),
        json!([2]),
        json!({ "n": 2 }),
        json!(2.5),
    ] {
        let response = server
            .post("/recommendations")
            .json(&json!({ "prod": "Red Shoe", "nbr": nbr }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_recommendations_missing_product_is_bad_request() {
    let server = create_test_server();
    for body in [json!({ "nbr": 2 }), json!({ "prod": "", "nbr": 2 })] {
        let response = server.post("/recommendations").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_search() {
    let server = create_test_server();

    let response = server
        .get("/search")
        .add_query_param("q", "shoe")
        .add_query_param("limit", "1")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Red Shoe");

    let response = server
        .get("/search")
        .add_query_param("q", "shoe")
        .add_query_param("limit", "lots")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["results"].as_array().unwrap().is_empty());
    assert_eq!(body["message"], "No results found.");
}

#[tokio::test]
async fn test_signup_and_signin_flow() {
    let server = create_test_server();

    let response = server
        .post("/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "s3cret"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    assert_eq!(created["username"], "alice");
    assert!(created.get("password").is_none());

    let response = server
        .post("/signup")
        .json(&json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "other"
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = server
        .post("/signin")
        .json(&json!({ "username": "alice", "password": "s3cret" }))
        .await;
    response.assert_status_ok();
    let account: serde_json::Value = response.json();
    assert_eq!(account["id"], created["id"]);

    let response = server
        .post("/signin")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
