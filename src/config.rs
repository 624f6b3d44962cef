use crate::types::Metal;
use std::env;
use std::time::Duration;

/// Base URLs for every upstream provider. Defaults point at the real vendors;
/// each can be overridden through the environment, which also serves as the
/// seam the integration tests use to stand in mock upstreams.
#[derive(Debug, Clone)]
pub struct ProviderBases {
    /// goldapi.io (authenticated spot provider).
    pub goldapi: String,
    /// api.gold-api.com (free spot provider, no key).
    pub gold_api_com: String,
    /// metalpriceapi.com (authenticated spot + timeframe provider).
    pub metal_price: String,
    /// api.exchangerate.host (free spot + timeframe provider).
    pub exchange_host: String,
    /// open.er-api.com (free FX table).
    pub open_er: String,
    /// api.frankfurter.app (free FX table).
    pub frankfurter: String,
}

impl Default for ProviderBases {
    fn default() -> Self {
        Self {
            goldapi: "https://www.goldapi.io".to_string(),
            gold_api_com: "https://api.gold-api.com".to_string(),
            metal_price: "https://api.metalpriceapi.com".to_string(),
            exchange_host: "https://api.exchangerate.host".to_string(),
            open_er: "https://open.er-api.com".to_string(),
            frankfurter: "https://api.frankfurter.app".to_string(),
        }
    }
}

impl ProviderBases {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            goldapi: env::var("GOLDAPI_BASE").unwrap_or(defaults.goldapi),
            gold_api_com: env::var("GOLD_API_COM_BASE").unwrap_or(defaults.gold_api_com),
            metal_price: env::var("METALPRICE_BASE").unwrap_or(defaults.metal_price),
            exchange_host: env::var("EXCHANGE_HOST_BASE").unwrap_or(defaults.exchange_host),
            open_er: env::var("OPEN_ER_BASE").unwrap_or(defaults.open_er),
            frankfurter: env::var("FRANKFURTER_BASE").unwrap_or(defaults.frankfurter),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// goldapi.io token. Absence removes that provider from the table.
    pub goldapi_key: Option<String>,
    /// metalpriceapi.com token. Absence removes those providers from the table.
    pub metalprice_api_key: Option<String>,
    /// Hard deadline for a single spot/FX provider request (ms).
    pub fetch_timeout_ms: u64,
    /// Hard deadline for a single historical-range provider request (ms).
    pub series_timeout_ms: u64,
    /// Override for the per-metal spot cache TTL (seconds).
    pub spot_ttl_secs: Option<u64>,
    /// FX rate table cache TTL (seconds).
    pub fx_ttl_secs: u64,
    /// Historical series cache TTL (seconds).
    pub series_ttl_secs: u64,
    /// Upstream provider base URLs.
    pub bases: ProviderBases,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            goldapi_key: env::var("GOLDAPI_KEY").ok(),
            metalprice_api_key: env::var("METALPRICE_API_KEY").ok(),
            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3500),
            series_timeout_ms: env::var("SERIES_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            spot_ttl_secs: env::var("SPOT_TTL_SECS").ok().and_then(|v| v.parse().ok()),
            fx_ttl_secs: env::var("FX_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            series_ttl_secs: env::var("SERIES_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            bases: ProviderBases::from_env(),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn series_timeout(&self) -> Duration {
        Duration::from_millis(self.series_timeout_ms)
    }

    /// Spot cache TTL for a metal: the env override if set, otherwise the
    /// per-metal default.
    pub fn spot_ttl(&self, metal: Metal) -> Duration {
        self.spot_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| metal.spot_ttl())
    }

    pub fn fx_ttl(&self) -> Duration {
        Duration::from_secs(self.fx_ttl_secs)
    }

    pub fn series_ttl(&self) -> Duration {
        Duration::from_secs(self.series_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
