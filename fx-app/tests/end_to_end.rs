//! End-to-end tests: the assembled proxy against a stub upstream, queried
//! through the client SDK.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use fx_app::{Config, build_server};
use fx_client::{ClientError, FxClient};

const RATES_BODY: &str = r#"{"rates": {"AUD": 1.27, "SGD": 1.36, "EUR": 0.85}}"#;

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    body: &'static str,
    hits: Arc<AtomicUsize>,
}

async fn latest(State(upstream): State<Upstream>) -> impl IntoResponse {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    (upstream.status, upstream.body)
}

/// Starts a stub upstream and returns its URL and hit counter.
async fn spawn_upstream(status: StatusCode, body: &'static str) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/latest.json", get(latest))
        .with_state(Upstream {
            status,
            body,
            hits: hits.clone(),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}/api/latest.json", addr), hits)
}

/// Starts the proxy pointed at `upstream_url`; dropping the sender stops it.
async fn spawn_proxy(upstream_url: &str) -> (FxClient, oneshot::Sender<()>) {
    spawn_proxy_with_app_id(upstream_url, Some("123456")).await
}

async fn spawn_proxy_with_app_id(
    upstream_url: &str,
    app_id: Option<&str>,
) -> (FxClient, oneshot::Sender<()>) {
    let mut vars: HashMap<&str, String> = HashMap::from([
        ("OPEN_EXCHANGE_URL", upstream_url.to_string()),
        ("UPSTREAM_TIMEOUT_SECS", "2".to_string()),
    ]);
    if let Some(app_id) = app_id {
        vars.insert("APP_ID", app_id.to_string());
    }
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let server = build_server(&config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    tokio::spawn(async move {
        server
            .serve(listener, async move {
                let _ = stopped.await;
            })
            .await
            .unwrap();
    });

    (FxClient::new(format!("http://{}", addr)), stop)
}

#[tokio::test]
async fn test_rates_are_proxied_and_cached() {
    let (upstream_url, hits) = spawn_upstream(StatusCode::OK, RATES_BODY).await;
    let (client, _stop) = spawn_proxy(&upstream_url).await;

    assert!(client.health().await.unwrap());

    let rates = client.current_rates().await.unwrap();
    assert_eq!(rates.len(), 3);
    assert_eq!(rates.get("EUR"), Some(&0.85));

    assert_eq!(client.rate("sgd").await.unwrap(), Some(1.36));
    assert_eq!(client.rate("ZZZ").await.unwrap(), None);

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_upstream_outage_is_a_server_error() {
    let (upstream_url, hits) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, "").await;
    let (client, _stop) = spawn_proxy(&upstream_url).await;

    for _ in 0..2 {
        let err = client.current_rates().await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }), "got {err:?}");
    }

    // Failures are never cached, so each request went upstream.
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_non_json_upstream_is_a_server_error() {
    let (upstream_url, _) = spawn_upstream(StatusCode::OK, "Not a json").await;
    let (client, _stop) = spawn_proxy(&upstream_url).await;

    let err = client.rate("SGD").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_missing_app_id_starts_and_reports_server_error() {
    let (upstream_url, hits) = spawn_upstream(StatusCode::UNAUTHORIZED, "").await;
    let (client, _stop) = spawn_proxy_with_app_id(&upstream_url, None).await;

    assert!(client.health().await.unwrap());

    let err = client.current_rates().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }), "got {err:?}");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
