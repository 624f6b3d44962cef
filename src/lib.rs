//! Assay - precious-metal spot price resolution server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::{Cache, FxResolver, PriceResolver, SeriesResolver};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spot: Arc<PriceResolver>,
    pub series: Arc<SeriesResolver>,
    pub fx: Arc<FxResolver>,
}

impl AppState {
    /// Wire every resolver up with its own fresh cache and one shared HTTP
    /// client. Client construction can fail (TLS backend init), so it happens
    /// here once and the error propagates to startup.
    pub fn new(config: Arc<Config>) -> reqwest::Result<Self> {
        let client = services::resolver::http_client()?;
        Ok(Self {
            spot: Arc::new(PriceResolver::new(
                client.clone(),
                config.clone(),
                Cache::new(),
            )),
            series: Arc::new(SeriesResolver::new(
                client.clone(),
                config.clone(),
                Cache::new(),
            )),
            fx: Arc::new(FxResolver::new(client, config.clone(), Cache::new())),
            config,
        })
    }
}

/// Build the application router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
