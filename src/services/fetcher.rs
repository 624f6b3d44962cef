//! Timeout-bounded single-request fetcher.
//!
//! One GET, one hard deadline, no retries. Timeout, transport failure,
//! non-2xx status, and an undecodable body all collapse into [`FetchError`]:
//! to the resolver they mean the same thing, "this provider is unavailable
//! right now". Retry and fallback live in the resolver, not here.

use crate::sources::ProviderEndpoint;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Issue one GET against the endpoint and decode the body as JSON, failing
/// if the deadline elapses first. Dropping the returned future cancels the
/// in-flight request.
pub async fn fetch_json(
    client: &Client,
    endpoint: &ProviderEndpoint,
    deadline: Duration,
) -> Result<Value, FetchError> {
    let mut request = client.get(&endpoint.url);
    for (name, value) in &endpoint.headers {
        request = request.header(*name, value);
    }

    // One deadline covers the whole exchange, headers and body together.
    tokio::time::timeout(deadline, async {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.json::<Value>().await?)
    })
    .await
    .map_err(|_| FetchError::Timeout(deadline))?
}
