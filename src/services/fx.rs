//! USD exchange rate table resolution.
//!
//! Fetches a full USD-based rate table from the FX provider race, caches it
//! whole, and filters per request. `USD` is always forced to exactly 1.0 so
//! downstream conversion math can divide without surprises.

use crate::config::Config;
use crate::services::cache::Cache;
use crate::services::normalizer::extract_rates;
use crate::services::resolver::{race_first, ResolveError};
use crate::sources;
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FX_CACHE_KEY: &str = "fx:usd";

pub type RateTable = BTreeMap<String, f64>;

/// Multi-provider FX table resolver with an injected cache.
pub struct FxResolver {
    client: Client,
    cache: Cache<RateTable>,
    config: Arc<Config>,
}

impl FxResolver {
    pub fn new(client: Client, config: Arc<Config>, cache: Cache<RateTable>) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    /// Resolve rates for the requested symbols; an empty request returns the
    /// whole table. `USD` is always present and exactly 1.
    pub async fn resolve(&self, symbols: &[String]) -> Result<RateTable, ResolveError> {
        let table = self.table().await?;

        let mut rates: RateTable = if symbols.is_empty() {
            table
        } else {
            symbols
                .iter()
                .filter_map(|symbol| {
                    let upper = symbol.to_uppercase();
                    table.get(&upper).map(|rate| (upper, *rate))
                })
                .collect()
        };

        rates.insert("USD".to_string(), 1.0);
        Ok(rates)
    }

    async fn table(&self) -> Result<RateTable, ResolveError> {
        if let Some(table) = self.cache.get(FX_CACHE_KEY) {
            debug!(symbols = table.len(), "fx cache hit");
            return Ok(table);
        }

        let endpoints = sources::fx_endpoints(&self.config);
        let won = race_first(
            &self.client,
            endpoints,
            self.config.fetch_timeout(),
            |body, _endpoint| {
                let rates = extract_rates(body);
                (!rates.is_empty()).then_some(rates)
            },
        )
        .await;

        if let Some((table, source)) = won {
            info!(source, symbols = table.len(), "fx table resolved");
            self.cache
                .set(FX_CACHE_KEY.to_string(), table.clone(), self.config.fx_ttl());
            return Ok(table);
        }

        if let Some((table, _)) = self.cache.get_stale(FX_CACHE_KEY) {
            warn!("all fx providers exhausted, serving stale table");
            return Ok(table);
        }

        Err(ResolveError::NoRates)
    }
}
