//! Integration tests for the pricing HTTP API.
//!
//! These drive the full router (metrics, rate limiting, tracing layers)
//! with `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use pricing_hex::{PricingService, inbound::HttpServer};
use pricing_types::LimitTable;
use tower::ServiceExt;

fn app() -> Router {
    HttpServer::new(PricingService::with_limits(LimitTable::default())).router()
}

fn price_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/price")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_price_within_limit() {
    let (status, json) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":100.00,"currency":"USD"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["allowed"], true);
    assert_eq!(json["price"], "100.10");
    assert_eq!(json["message"], "approved");
}

#[tokio::test]
async fn test_price_accepts_string_amount() {
    let (status, json) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":"123.45","currency":"EUR"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], "123.57345");
}

#[tokio::test]
async fn test_price_exceeding_limit_is_400_with_reason() {
    let (status, json) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":"20000.00","currency":"USD"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["detail"]["message"],
        "transaction rejected: USD amount 20000.00 exceeds limit 10000.00"
    );
}

#[tokio::test]
async fn test_jpy_limit_boundary() {
    let (status, _) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":"1200000.00","currency":"JPY"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":"1200000.01","currency":"JPY"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_amount_is_422() {
    let (status, json) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":0.00,"currency":"USD"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = json["detail"].as_array().unwrap();
    assert!(!detail.is_empty());
    assert_eq!(detail[0]["field"], "amount");
}

#[tokio::test]
async fn test_invalid_currency_is_422() {
    let (status, json) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":100.00,"currency":"XYZ"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = json["detail"].as_array().unwrap();
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0]["field"], "currency");
    assert_eq!(detail[0]["code"], "pattern");
}

#[tokio::test]
async fn test_missing_field_is_422() {
    let (status, json) = send(app(), price_request(r#"{"user_id":"u1","amount":"5"}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["field"], "body");
}

#[tokio::test]
async fn test_malformed_json_is_422() {
    let (status, json) = send(app(), price_request("{not json")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["field"], "body");
    assert_eq!(json["detail"][0]["code"], "syntax");
}

#[tokio::test]
async fn test_missing_content_type_is_422() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/price")
        .body(Body::from(
            r#"{"user_id":"u1","amount":"5","currency":"USD"}"#,
        ))
        .unwrap();
    let (status, json) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["field"], "body");
    assert_eq!(json["detail"][0]["code"], "content_type");
}

#[tokio::test]
async fn test_numeric_amount_is_not_rounded_through_float() {
    let (status, json) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":10000.000000000000001,"currency":"USD"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"][0]["field"], "amount");
    assert_eq!(json["detail"][0]["code"], "decimal_places");

    let (status, _) = send(
        app(),
        price_request(r#"{"user_id":"u1","amount":10000.01,"currency":"USD"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_limits_endpoint_lists_table() {
    let request = Request::builder()
        .uri("/limits")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["currency"], "USD");
    assert_eq!(rows[0]["limit"], "10000");
    assert_eq!(rows[2]["currency"], "JPY");
}

#[tokio::test]
async fn test_health_and_openapi() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");

    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/price"].is_object());
}
