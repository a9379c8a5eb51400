//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use fx_types::RateProvider;

use super::handlers::{self, AppState};
use crate::RateService;

/// HTTP Server for the rate proxy.
pub struct HttpServer<P: RateProvider> {
    state: Arc<AppState<P>>,
}

impl<P: RateProvider> HttpServer<P> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: RateService<P>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Returns the service behind the routes.
    pub fn service(&self) -> &RateService<P> {
        &self.state.service
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/current_rates", get(handlers::current_rates::<P>))
            .route("/api-docs/openapi.json", get(handlers::openapi))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Binds `addr` and serves until a shutdown signal arrives.
    ///
    /// Failing to bind is returned to the caller; nothing else is fatal.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
