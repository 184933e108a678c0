//! Degraded Mode Tests
//!
//! With no store configured the service still starts:
//! - service endpoints keep answering 200
//! - every data endpoint answers 500 "Database not configured"

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use modelforge::http_server::{HttpServer, ServerConfig};
use modelforge::store::{StoreAdapter, StoreConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn degraded_router() -> Router {
    HttpServer::new(ServerConfig::default(), StoreAdapter::unconfigured()).router()
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = degraded_router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn assert_not_configured(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, &json!({"detail": "Database not configured"}));
}

#[tokio::test]
async fn test_connect_without_config_is_degraded() {
    let adapter = StoreAdapter::connect(&StoreConfig::default()).await;
    assert!(!adapter.is_configured());
}

#[tokio::test]
async fn test_service_endpoints_still_answer() {
    let (status, body) = send(get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "AI Platform backend is live");

    let (status, body) = send(get("/schema")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_diagnostics_reports_not_available() {
    let (status, body) = send(get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["database"], "❌ Not Available");
    assert_eq!(body["connection_status"], "Not Connected");
    assert_eq!(body["collections"], json!([]));
    assert!(body["database_url"].is_string());
    assert!(body["database_name"].is_string());
}

#[tokio::test]
async fn test_generate_not_configured() {
    let (status, body) = send(post("/api/generate", json!({"prompt": "p"}))).await;
    assert_not_configured(status, &body);
}

#[tokio::test]
async fn test_lists_not_configured() {
    let (status, body) = send(get("/api/models")).await;
    assert_not_configured(status, &body);

    let (status, body) = send(get("/api/deployments?limit=0")).await;
    assert_not_configured(status, &body);
}

#[tokio::test]
async fn test_deploy_not_configured() {
    let (status, body) = send(post(
        "/api/deploy",
        json!({"model_id": "507f1f77bcf86cd799439011"}),
    ))
    .await;
    assert_not_configured(status, &body);
}

#[tokio::test]
async fn test_serve_not_configured() {
    let (status, body) = send(get("/serve/507f1f77bcf86cd799439011?q=hi")).await;
    assert_not_configured(status, &body);
}
