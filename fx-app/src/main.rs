//! # FX Rate Proxy
//!
//! Binary entry point: configuration, tracing, then serve until shutdown.

use fx_app::{Config, ProviderKind, build_server, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!("Starting FX rate proxy on port {}", config.port);
    match config.provider {
        ProviderKind::OpenExchange => tracing::info!("Using upstream: {}", config.upstream_url),
        ProviderKind::Static => tracing::info!("Using static development rates"),
    }
    tracing::info!("Caching rates for {:?}", config.cache_ttl);
    if config.missing_credential() {
        tracing::warn!("APP_ID is not set; upstream requests will likely be rejected");
    }

    let server = build_server(&config);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
