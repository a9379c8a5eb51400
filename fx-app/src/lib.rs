//! # FX Application
//!
//! Wires the components together:
//! - Load configuration from environment
//! - Initialize tracing
//! - Build the upstream provider, rate cache and rate service
//! - Hand back an HTTP server ready to run

pub mod config;

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use exchange_rates::{OpenExchangeClient, StaticRateProvider};
use fx_hex::{RateCache, RateService, inbound::HttpServer, spawn_sweeper};
use fx_types::RateProvider;

pub use config::{Config, LogFormat, ProviderKind};

/// Server type produced by [`build_server`].
pub type FxServer = HttpServer<Box<dyn RateProvider>>;

/// Installs the global tracing subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,fx_app=debug,fx_hex=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with((format == LogFormat::Pretty).then(fmt::layer))
        .with((format == LogFormat::Json).then(|| fmt::layer().json()))
        .init();
}

/// Builds the configured upstream provider.
pub fn build_provider(config: &Config) -> Box<dyn RateProvider> {
    match config.provider {
        ProviderKind::OpenExchange => Box::new(
            OpenExchangeClient::new(&config.upstream_url, &config.app_id)
                .with_timeout(config.upstream_timeout),
        ),
        ProviderKind::Static => Box::new(StaticRateProvider::default()),
    }
}

/// Builds the HTTP server and starts the cache sweeper.
///
/// Must be called inside a Tokio runtime.
pub fn build_server(config: &Config) -> FxServer {
    let cache = Arc::new(RateCache::new(config.cache_ttl));
    if let Some(every) = config.sweep_interval {
        // Exits on its own once the cache is dropped.
        spawn_sweeper(&cache, every);
    }

    let service = RateService::new(build_provider(config), cache);
    HttpServer::new(service)
}
