//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use exchange_rates::OPEN_EXCHANGE_LATEST_URL;

/// Which upstream the proxy talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenExchange,
    Static,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub provider: ProviderKind,
    pub app_id: String,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub cache_ttl: Duration,
    /// `None` disables the background sweep.
    pub sweep_interval: Option<Duration>,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()?;

        let provider = match lookup("RATE_PROVIDER").as_deref().map(str::trim) {
            None | Some("") | Some("openexchange") => ProviderKind::OpenExchange,
            Some("static") => ProviderKind::Static,
            Some(other) => anyhow::bail!("Unknown RATE_PROVIDER: {}", other),
        };

        // Blank is allowed: the upstream rejects the call and requests answer 500.
        let app_id = lookup("APP_ID").unwrap_or_default().trim().to_string();

        let upstream_url =
            lookup("OPEN_EXCHANGE_URL").unwrap_or_else(|| OPEN_EXCHANGE_LATEST_URL.to_string());

        let upstream_timeout = secs(&lookup, "UPSTREAM_TIMEOUT_SECS", 10)?;
        if upstream_timeout.is_zero() {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }
        let cache_ttl = secs(&lookup, "CACHE_TTL_SECS", 60 * 60)?;
        if cache_ttl.is_zero() {
            anyhow::bail!("CACHE_TTL_SECS must be greater than zero");
        }
        let sweep_interval = Some(secs(&lookup, "CACHE_SWEEP_SECS", 60)?).filter(|d| !d.is_zero());

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            port,
            provider,
            app_id,
            upstream_url,
            upstream_timeout,
            cache_ttl,
            sweep_interval,
            log_format,
        })
    }

    /// Whether the configured upstream is missing its credential.
    pub fn missing_credential(&self) -> bool {
        self.provider == ProviderKind::OpenExchange && self.app_id.is_empty()
    }
}

fn secs<F>(lookup: &F, key: &str, default: u64) -> anyhow::Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} must be a number of seconds: {}", key, e))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}
