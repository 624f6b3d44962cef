//! Resolver behavior against mock upstream providers: exhaustion, racing,
//! cache short-circuit, and stale degradation.

mod common;

use assay::services::{Cache, Freshness, PriceResolver, ResolveError};
use assay::types::Metal;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use common::{serve, test_config};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn exhaustion_returns_definitive_failure_within_deadline() {
    // Every free provider answers 500.
    let router = Router::new()
        .route(
            "/price/:code",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/latest", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let base = serve(router).await;

    let config = Arc::new(test_config(&base));
    let resolver = PriceResolver::new(reqwest::Client::new(), config, Cache::new());

    let started = Instant::now();
    let result = resolver.resolve(Metal::Gold).await;

    assert!(matches!(result, Err(ResolveError::NoPrice(Metal::Gold))));
    // Race strategy: bounded by the single per-provider deadline, not the sum.
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test]
async fn exhaustion_by_timeout_does_not_hang() {
    let router = Router::new()
        .route(
            "/price/:code",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Json(json!({"price": 2400.0}))
            }),
        )
        .route(
            "/latest",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Json(json!({"rates": {"USD": 2400.0}}))
            }),
        );
    let base = serve(router).await;

    let config = Arc::new(test_config(&base));
    let resolver = PriceResolver::new(reqwest::Client::new(), config, Cache::new());

    let started = Instant::now();
    let result = resolver.resolve(Metal::Gold).await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test]
async fn race_returns_first_success_and_is_stable() {
    // gold-api answers in 50ms with 2400, exchangerate.host in 400ms with 2500.
    let router = Router::new()
        .route(
            "/price/:code",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Json(json!({"price": 2400.0}))
            }),
        )
        .route(
            "/latest",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(400)).await;
                Json(json!({"rates": {"USD": 2500.0}}))
            }),
        );
    let base = serve(router).await;

    let mut config = test_config(&base);
    config.fetch_timeout_ms = 2000;
    let config = Arc::new(config);

    // Fresh cache each round so every call actually races.
    for _ in 0..3 {
        let resolver = PriceResolver::new(reqwest::Client::new(), config.clone(), Cache::new());
        let result = resolver.resolve(Metal::Gold).await.unwrap();
        assert_eq!(result.quote.price_usd, 2400.0);
        assert_eq!(result.quote.source, "gold-api");
        assert_eq!(result.freshness, Freshness::Live);
    }
}

#[tokio::test]
async fn invalid_body_loses_race_to_valid_provider() {
    // One provider returns a junk (zero) price, the other a valid one but slower.
    let router = Router::new()
        .route("/price/:code", get(|| async { Json(json!({"price": 0.0})) }))
        .route(
            "/latest",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Json(json!({"rates": {"USD": 2450.0}}))
            }),
        );
    let base = serve(router).await;

    let config = Arc::new(test_config(&base));
    let resolver = PriceResolver::new(reqwest::Client::new(), config, Cache::new());

    let result = resolver.resolve(Metal::Gold).await.unwrap();
    assert_eq!(result.quote.price_usd, 2450.0);
    assert_eq!(result.quote.source, "exchangerate-host");
}

#[tokio::test]
async fn cache_short_circuits_second_call() {
    let upstream_calls = Arc::new(AtomicUsize::new(0));

    let calls_a = upstream_calls.clone();
    let calls_b = upstream_calls.clone();
    let router = Router::new()
        .route(
            "/price/:code",
            get(move || {
                let calls = calls_a.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"price": 2400.5}))
                }
            }),
        )
        .route(
            "/latest",
            get(move || {
                let calls = calls_b.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"rates": {"USD": 2401.0}}))
                }
            }),
        );
    let base = serve(router).await;

    let config = Arc::new(test_config(&base));
    let resolver = PriceResolver::new(reqwest::Client::new(), config, Cache::new());

    let first = resolver.resolve(Metal::Gold).await.unwrap();
    assert_eq!(first.freshness, Freshness::Live);
    // Let any cancelled loser request settle before sampling the counter.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let calls_after_first = upstream_calls.load(Ordering::SeqCst);
    assert!(calls_after_first >= 1);

    let second = resolver.resolve(Metal::Gold).await.unwrap();
    assert_eq!(second.freshness, Freshness::Cached);
    assert_eq!(second.quote.price_usd, first.quote.price_usd);
    // No new upstream traffic inside the TTL window.
    assert_eq!(upstream_calls.load(Ordering::SeqCst), calls_after_first);
}

/// Raw upstream that answers headers promptly, then never finishes the body.
async fn serve_stalled_body() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\n\
                          content-type: application/json\r\n\
                          content-length: 4096\r\n\r\n{\"price\": 2",
                    )
                    .await;
                tokio::time::sleep(Duration::from_secs(30)).await;
            });
        }
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn stalled_body_is_bounded_by_a_single_deadline() {
    // Fast headers plus an unfinished body must not grant a provider a
    // second deadline for the body read.
    let base = serve_stalled_body().await;

    let mut config = test_config(&base);
    config.fetch_timeout_ms = 400;
    let config = Arc::new(config);
    let resolver = PriceResolver::new(reqwest::Client::new(), config, Cache::new());

    let started = Instant::now();
    let result = resolver.resolve(Metal::Gold).await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_millis(700));
}

#[tokio::test]
async fn stale_cache_served_when_providers_go_dark() {
    let upstream_calls = Arc::new(AtomicUsize::new(0));

    // First request succeeds, everything after fails.
    let calls = upstream_calls.clone();
    let router = Router::new()
        .route(
            "/price/:code",
            get(move || {
                let calls = calls.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Json(json!({"price": 2400.5})).into_response()
                    } else {
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    }
                }
            }),
        )
        .route("/latest", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let base = serve(router).await;

    let mut config = test_config(&base);
    config.spot_ttl_secs = Some(0); // entry expires immediately
    let config = Arc::new(config);
    let resolver = PriceResolver::new(reqwest::Client::new(), config, Cache::new());

    let first = resolver.resolve(Metal::Gold).await.unwrap();
    assert_eq!(first.freshness, Freshness::Live);

    let second = resolver.resolve(Metal::Gold).await.unwrap();
    assert_eq!(second.freshness, Freshness::Stale);
    assert_eq!(second.quote.price_usd, 2400.5);
}
