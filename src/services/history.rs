//! Historical series resolution.
//!
//! Same provider-table + deadline + normalization pattern as the spot
//! resolver, but a provider only wins the race if its normalized series is
//! non-empty. Total exhaustion yields an empty series rather than an error,
//! after the stale cache has been consulted.

use crate::config::Config;
use crate::services::cache::Cache;
use crate::services::normalizer::extract_series;
use crate::services::resolver::race_first;
use crate::sources;
use crate::types::{Metal, PriceSeries};
use chrono::NaiveDate;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Multi-provider historical series resolver with an injected cache.
pub struct SeriesResolver {
    client: Client,
    cache: Cache<PriceSeries>,
    config: Arc<Config>,
}

impl SeriesResolver {
    pub fn new(client: Client, config: Arc<Config>, cache: Cache<PriceSeries>) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    /// Resolve a price series for the date range, ascending by timestamp.
    /// Returns an empty series when nothing is obtainable.
    pub async fn resolve(&self, metal: Metal, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let key = format!("series:{}:{}:{}", metal, start, end);

        if let Some(series) = self.cache.get(&key) {
            debug!(%metal, points = series.len(), "series cache hit");
            return series;
        }

        let endpoints = sources::series_endpoints(metal, start, end, &self.config);
        let won = race_first(
            &self.client,
            endpoints,
            self.config.series_timeout(),
            |body, _endpoint| {
                let series = extract_series(body);
                (!series.is_empty()).then_some(series)
            },
        )
        .await;

        if let Some((series, source)) = won {
            info!(%metal, source, points = series.len(), "series resolved");
            self.cache
                .set(key, series.clone(), self.config.series_ttl());
            return series;
        }

        if let Some((series, _)) = self.cache.get_stale(&key) {
            warn!(%metal, "all series providers exhausted, serving stale series");
            return series;
        }

        warn!(%metal, %start, %end, "no series data obtainable");
        Vec::new()
    }
}
