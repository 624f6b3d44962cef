//! Upstream price-source descriptors.
//!
//! Each vendor module builds [`ProviderEndpoint`]s from static URL templates
//! plus configuration secrets. Building a table does no I/O and holds no
//! state, so it is reconstructed on every request. Authenticated providers
//! are listed first; their token's absence silently removes them, leaving the
//! free providers as the floor.

pub mod exchange_host;
pub mod fx;
pub mod gold_api_com;
pub mod goldapi;
pub mod metal_price;

use crate::config::Config;
use crate::types::Metal;
use chrono::NaiveDate;

/// One upstream price source for a single request.
#[derive(Debug, Clone)]
pub struct ProviderEndpoint {
    /// Stable provider id, used in logs and quote diagnostics.
    pub source: &'static str,
    /// Fully rendered request URL.
    pub url: String,
    /// Extra request headers (may carry a secret token).
    pub headers: Vec<(&'static str, String)>,
    /// Provider-specific key for locating the price in the response body.
    pub metal_key: String,
}

/// Providers to try for a spot price, in priority order.
pub fn spot_endpoints(metal: Metal, config: &Config) -> Vec<ProviderEndpoint> {
    let mut endpoints = Vec::with_capacity(4);
    if let Some(ref key) = config.goldapi_key {
        endpoints.push(goldapi::spot(metal, key, &config.bases.goldapi));
    }
    if let Some(ref key) = config.metalprice_api_key {
        endpoints.push(metal_price::spot(metal, key, &config.bases.metal_price));
    }
    endpoints.push(gold_api_com::spot(metal, &config.bases.gold_api_com));
    endpoints.push(exchange_host::spot(metal, &config.bases.exchange_host));
    endpoints
}

/// Providers to try for a historical date range, in priority order.
pub fn series_endpoints(
    metal: Metal,
    start: NaiveDate,
    end: NaiveDate,
    config: &Config,
) -> Vec<ProviderEndpoint> {
    let mut endpoints = Vec::with_capacity(2);
    if let Some(ref key) = config.metalprice_api_key {
        endpoints.push(metal_price::series(
            metal,
            start,
            end,
            key,
            &config.bases.metal_price,
        ));
    }
    endpoints.push(exchange_host::series(
        metal,
        start,
        end,
        &config.bases.exchange_host,
    ));
    endpoints
}

/// Providers for the USD FX rate table.
pub fn fx_endpoints(config: &Config) -> Vec<ProviderEndpoint> {
    vec![
        fx::open_er(&config.bases.open_er),
        fx::frankfurter(&config.bases.frankfurter),
    ]
}
