//! Spot price resolution.
//!
//! The resolver races every configured provider for a metal and takes the
//! first valid positive price. Individual provider failures (timeout, bad
//! status, unparseable body, junk price) are logged and swallowed; only total
//! exhaustion surfaces, and even then a stale cached quote is preferred over
//! an error.

use crate::config::Config;
use crate::error::AppError;
use crate::services::cache::Cache;
use crate::services::fetcher::{fetch_json, FetchError};
use crate::services::normalizer::extract_price;
use crate::sources::{self, ProviderEndpoint};
use crate::types::{Metal, PriceQuote};
use futures_util::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// How the returned quote was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// A provider answered on this request.
    Live,
    /// Served from an unexpired cache entry; no upstream call made.
    Cached,
    /// Every provider failed; served from an expired cache entry.
    Stale,
}

/// A resolved quote plus how it was obtained.
#[derive(Debug, Clone)]
pub struct SpotResult {
    pub quote: PriceQuote,
    pub freshness: Freshness,
}

/// Definitive resolution failure, reported as a value rather than a panic so
/// the HTTP layer can map it.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no price resolved for {0}")]
    NoPrice(Metal),

    #[error("no exchange rates resolved")]
    NoRates,
}

impl From<ResolveError> for AppError {
    fn from(_: ResolveError) -> Self {
        AppError::NoPrice
    }
}

#[derive(Debug, Error)]
enum ProviderError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no usable price in response body")]
    Unusable,
}

/// Race every endpoint concurrently and return the first success.
///
/// Each request is independently deadline-bounded. Once a winner completes,
/// the remaining futures are dropped with the set, which cancels their
/// in-flight requests. Losing outcomes are logged, never propagated.
pub(crate) async fn race_first<T, F>(
    client: &Client,
    endpoints: Vec<ProviderEndpoint>,
    deadline: Duration,
    extract: F,
) -> Option<(T, &'static str)>
where
    F: Fn(&Value, &ProviderEndpoint) -> Option<T>,
{
    let extract = &extract;
    let mut in_flight: FuturesUnordered<_> = endpoints
        .into_iter()
        .map(|endpoint| async move {
            let body = fetch_json(client, &endpoint, deadline)
                .await
                .map_err(|e| (endpoint.source, ProviderError::Fetch(e)))?;
            match extract(&body, &endpoint) {
                Some(value) => Ok((value, endpoint.source)),
                None => Err((endpoint.source, ProviderError::Unusable)),
            }
        })
        .collect();

    while let Some(outcome) = in_flight.next().await {
        match outcome {
            Ok((value, source)) => return Some((value, source)),
            Err((source, error)) => {
                warn!(provider = source, error = %error, "price source failed");
            }
        }
    }

    None
}

/// Builds the HTTP client shared by every resolver. Constructed once at
/// startup; a builder failure is fatal there, not papered over here.
pub(crate) fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent("assay/1.0 (precious metal price resolver)")
        .build()
}

/// Multi-provider spot price resolver with an injected cache.
pub struct PriceResolver {
    client: Client,
    cache: Cache<PriceQuote>,
    config: Arc<Config>,
}

impl PriceResolver {
    pub fn new(client: Client, config: Arc<Config>, cache: Cache<PriceQuote>) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    /// Resolve the current USD spot price for a metal.
    ///
    /// Order of preference: unexpired cache entry, live race winner, stale
    /// cache entry. Exactly one quote is returned per call; exhaustion with
    /// an empty cache is `ResolveError::NoPrice`.
    pub async fn resolve(&self, metal: Metal) -> Result<SpotResult, ResolveError> {
        let key = format!("spot:{}", metal);

        if let Some(quote) = self.cache.get(&key) {
            debug!(%metal, price = quote.price_usd, "spot cache hit");
            return Ok(SpotResult {
                quote,
                freshness: Freshness::Cached,
            });
        }

        let endpoints = sources::spot_endpoints(metal, &self.config);
        let won = race_first(
            &self.client,
            endpoints,
            self.config.fetch_timeout(),
            |body, endpoint| {
                extract_price(body, &endpoint.metal_key)
                    .and_then(|price| PriceQuote::new(price, endpoint.source))
            },
        )
        .await;

        if let Some((quote, source)) = won {
            info!(%metal, source, price = quote.price_usd, "spot price resolved");
            self.cache
                .set(key, quote.clone(), self.config.spot_ttl(metal));
            return Ok(SpotResult {
                quote,
                freshness: Freshness::Live,
            });
        }

        if let Some((quote, _)) = self.cache.get_stale(&key) {
            warn!(%metal, "all providers exhausted, serving stale price");
            return Ok(SpotResult {
                quote,
                freshness: Freshness::Stale,
            });
        }

        Err(ResolveError::NoPrice(metal))
    }
}
