pub mod fx;
pub mod health;
pub mod spot;
pub mod timeseries;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(spot::router())
        .merge(timeseries::router())
        .merge(fx::router())
}
