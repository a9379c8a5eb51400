//! HTTP-level tests for the rate proxy router.
//!
//! These drive the full middleware stack with `oneshot` requests against a
//! scripted upstream.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use fx_hex::{RateCache, RateService, inbound::HttpServer};
use fx_types::{RateProvider, RateSnapshot, Rates, UpstreamError};

/// Upstream that always answers the same way and counts calls.
struct FixedProvider {
    answer: Result<Rates, UpstreamError>,
    calls: AtomicUsize,
}

#[async_trait]
impl RateProvider for FixedProvider {
    async fn fetch_latest(&self) -> Result<RateSnapshot, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().map(RateSnapshot::new)
    }
}

fn sample_rates() -> Rates {
    Rates::from([
        ("AUD".to_string(), 1.27),
        ("SGD".to_string(), 1.36),
        ("EUR".to_string(), 0.85),
    ])
}

fn create_test_server(answer: Result<Rates, UpstreamError>) -> (HttpServer<Arc<FixedProvider>>, Arc<FixedProvider>) {
    let provider = Arc::new(FixedProvider {
        answer,
        calls: AtomicUsize::new(0),
    });
    let cache = Arc::new(RateCache::new(Duration::from_secs(3600)));
    let service = RateService::new(provider.clone(), cache);
    (HttpServer::new(service), provider)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_get_all_current_rates() {
    let (server, _) = create_test_server(Ok(sample_rates()));

    let response = server.router().oneshot(get("/current_rates")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = body_string(response).await;
    let data: Rates = serde_json::from_str(&body).unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data.get("SGD"), Some(&1.36));
}

#[tokio::test]
async fn test_body_is_indented_with_four_spaces() {
    let (server, _) = create_test_server(Ok(sample_rates()));

    let response = server.router().oneshot(get("/current_rates")).await.unwrap();
    let body = body_string(response).await;

    assert_eq!(
        body,
        "{\n    \"AUD\": 1.27,\n    \"EUR\": 0.85,\n    \"SGD\": 1.36\n}"
    );
}

#[tokio::test]
async fn test_get_single_rate() {
    let (server, _) = create_test_server(Ok(sample_rates()));

    let response = server
        .router()
        .oneshot(get("/current_rates?currency=SGD"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let data: Rates = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(data, Rates::from([("SGD".to_string(), 1.36)]));
}

#[tokio::test]
async fn test_get_single_rate_lowercase() {
    let (server, _) = create_test_server(Ok(sample_rates()));

    let response = server
        .router()
        .oneshot(get("/current_rates?currency=sgd"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let data: Rates = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(data.get("SGD"), Some(&1.36));
}

#[tokio::test]
async fn test_repeated_currency_uses_first_value() {
    let (server, _) = create_test_server(Ok(sample_rates()));

    let response = server
        .router()
        .oneshot(get("/current_rates?currency=SGD&currency=AUD"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let data: Rates = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(data, Rates::from([("SGD".to_string(), 1.36)]));
}

#[tokio::test]
async fn test_unknown_currency_is_404() {
    let (server, _) = create_test_server(Ok(sample_rates()));

    let response = server
        .router()
        .oneshot(get("/current_rates?currency=ZZZ"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "Not Found");
}

#[tokio::test]
async fn test_upstream_unavailable_is_500() {
    let (server, _) = create_test_server(Err(UpstreamError::Status(503)));

    let response = server.router().oneshot(get("/current_rates")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Internal Server Error");
}

#[tokio::test]
async fn test_malformed_upstream_is_500() {
    let (server, _) = create_test_server(Err(UpstreamError::Malformed("not json".into())));

    let response = server
        .router()
        .oneshot(get("/current_rates?currency=SGD"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_repeated_requests_hit_cache() {
    let (server, provider) = create_test_server(Ok(sample_rates()));
    let app = server.router();

    for uri in ["/current_rates", "/current_rates?currency=AUD", "/current_rates"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert!(server.service().cache().get().is_some());
}

#[tokio::test]
async fn test_post_is_not_allowed() {
    let (server, _) = create_test_server(Ok(sample_rates()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/current_rates")
        .body(Body::empty())
        .unwrap();
    let response = server.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health() {
    let (server, provider) = create_test_server(Ok(sample_rates()));

    let response = server.router().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_openapi_document() {
    let (server, _) = create_test_server(Ok(sample_rates()));

    let response = server
        .router()
        .oneshot(get("/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["paths"]["/current_rates"].is_object());
}
