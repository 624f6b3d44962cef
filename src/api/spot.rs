use crate::error::{AppError, Result};
use crate::services::Freshness;
use crate::types::Metal;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

/// Spot price response. `cached` appears only when the quote was served from
/// an expired cache entry because every provider failed, so clients can badge
/// it as non-live.
#[derive(Debug, Serialize)]
pub struct SpotResponse {
    pub price: f64,
    #[serde(skip_serializing_if = "is_false")]
    pub cached: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

pub fn router() -> Router<AppState> {
    Router::new().route("/spot/:metal", get(get_spot))
}

/// GET /spot/:metal
///
/// An unknown metal is rejected before any provider call is attempted.
async fn get_spot(
    State(state): State<AppState>,
    Path(metal): Path<String>,
) -> Result<Json<SpotResponse>> {
    let metal = Metal::from_spot(&metal).ok_or(AppError::InvalidMetal)?;
    let result = state.spot.resolve(metal).await?;
    Ok(Json(SpotResponse {
        price: result.quote.price_usd,
        cached: result.freshness == Freshness::Stale,
    }))
}
