//! Shared helpers: mock upstream servers on ephemeral ports and a config
//! whose provider bases all point at them.

#![allow(dead_code)]

use assay::config::{Config, ProviderBases};
use axum::Router;

/// Serve a mock upstream, returning its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Config with every provider base pointed at `base` and no paid tokens.
pub fn test_config(base: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        goldapi_key: None,
        metalprice_api_key: None,
        fetch_timeout_ms: 500,
        series_timeout_ms: 500,
        spot_ttl_secs: None,
        fx_ttl_secs: 3600,
        series_ttl_secs: 3600,
        bases: ProviderBases {
            goldapi: base.to_string(),
            gold_api_com: base.to_string(),
            metal_price: base.to_string(),
            exchange_host: base.to_string(),
            open_er: base.to_string(),
            frankfurter: base.to_string(),
        },
    }
}
