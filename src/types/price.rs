use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A successfully resolved USD spot price, per troy ounce.
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuote {
    /// USD per troy ounce. Always finite and strictly positive.
    pub price_usd: f64,
    /// When the winning provider answered.
    pub resolved_at: DateTime<Utc>,
    /// Which provider satisfied the request.
    pub source: &'static str,
}

impl PriceQuote {
    /// Build a quote, rejecting anything that is not a finite positive price.
    /// A zero or negative "price" would corrupt every downstream calculation,
    /// so it is treated as no price at all.
    pub fn new(price_usd: f64, source: &'static str) -> Option<Self> {
        (price_usd.is_finite() && price_usd > 0.0).then(|| Self {
            price_usd,
            resolved_at: Utc::now(),
            source,
        })
    }
}

/// One point in a historical price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// USD price.
    pub price: f64,
    /// Unix seconds.
    pub timestamp: i64,
    /// ISO date derived from the timestamp.
    pub date: String,
}

impl TimeSeriesPoint {
    /// Build a point from a Unix timestamp, rejecting non-positive prices.
    pub fn new(price: f64, timestamp: i64) -> Option<Self> {
        if !price.is_finite() || price <= 0.0 {
            return None;
        }
        let date = DateTime::from_timestamp(timestamp, 0)?
            .format("%Y-%m-%d")
            .to_string();
        Some(Self {
            price,
            timestamp,
            date,
        })
    }
}

/// An ordered sequence of points, non-decreasing in timestamp.
pub type PriceSeries = Vec<TimeSeriesPoint>;
