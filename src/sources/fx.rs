//! Free USD FX rate table providers.
//!
//! open.er-api.com: `GET {base}/v6/latest/USD` → `{"rates": {"EUR": 0.92, ...}}`.
//! frankfurter.app: `GET {base}/latest?from=USD` → same top-level `rates` shape.

use super::ProviderEndpoint;

pub fn open_er(base: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        source: "open-er-api",
        url: format!("{}/v6/latest/USD", base),
        headers: Vec::new(),
        metal_key: "USD".to_string(),
    }
}

pub fn frankfurter(base: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        source: "frankfurter",
        url: format!("{}/latest?from=USD", base),
        headers: Vec::new(),
        metal_key: "USD".to_string(),
    }
}
