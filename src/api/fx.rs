use crate::error::Result;
use crate::services::RateTable;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FxQuery {
    /// Comma-separated currency codes; empty means the whole table.
    pub symbols: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FxResponse {
    pub base: &'static str,
    pub rates: RateTable,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/fx", get(get_fx))
}

/// GET /fx?symbols=CSV — USD rate table; `USD` is always exactly 1.
async fn get_fx(
    State(state): State<AppState>,
    Query(query): Query<FxQuery>,
) -> Result<Json<FxResponse>> {
    let symbols: Vec<String> = query
        .symbols
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let rates = state.fx.resolve(&symbols).await?;
    Ok(Json(FxResponse { base: "USD", rates }))
}
