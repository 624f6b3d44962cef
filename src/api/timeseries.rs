use crate::error::{AppError, Result};
use crate::services::indicators::{ema, macd, rsi, sma, MacdOutput};
use crate::types::{Metal, PriceSeries};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Metal name or ISO code (gold/silver/platinum/XAU/XAG/XPT).
    pub metal: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/timeseries", get(get_timeseries))
        .route("/timeseries/indicators", get(get_indicators))
}

/// Defaults: gold, trailing 30 days ending today.
fn parse_query(query: &SeriesQuery) -> Result<(Metal, NaiveDate, NaiveDate)> {
    let metal = match &query.metal {
        Some(s) => Metal::parse(s).ok_or(AppError::InvalidMetal)?,
        None => Metal::Gold,
    };
    let end = match &query.end_date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate)?,
        None => Utc::now().date_naive(),
    };
    let start = match &query.start_date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate)?,
        None => end - chrono::Duration::days(30),
    };
    if start > end {
        return Err(AppError::InvalidDate);
    }
    Ok((metal, start, end))
}

/// GET /timeseries — ascending price series; `[]` when nothing is obtainable.
async fn get_timeseries(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<PriceSeries>> {
    let (metal, start, end) = parse_query(&query)?;
    Ok(Json(state.series.resolve(metal, start, end).await))
}

/// Indicator values computed over the resolved series. Fields are `null`
/// when the series is too short for that indicator.
#[derive(Debug, Serialize)]
pub struct IndicatorsResponse {
    pub metal: Metal,
    pub points: usize,
    pub sma_20: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub rsi_14: Option<f64>,
    pub macd: Option<MacdOutput>,
}

/// GET /timeseries/indicators
async fn get_indicators(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<IndicatorsResponse>> {
    let (metal, start, end) = parse_query(&query)?;
    let series = state.series.resolve(metal, start, end).await;
    let closes: Vec<f64> = series.iter().map(|p| p.price).collect();

    Ok(Json(IndicatorsResponse {
        metal,
        points: closes.len(),
        sma_20: sma(&closes, 20),
        ema_12: ema(&closes, 12),
        ema_26: ema(&closes, 26),
        rsi_14: rsi(&closes, 14),
        macd: macd(&closes),
    }))
}
