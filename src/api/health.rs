use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health — liveness plus which paid providers are configured.
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "providers": {
            "goldapi": state.config.goldapi_key.is_some(),
            "metalpriceapi": state.config.metalprice_api_key.is_some(),
        }
    }))
}
