//! api.gold-api.com — free spot provider, no key required.
//!
//! `GET {base}/price/XAU` returns `{"name": "Gold", "price": 2400.5, ...}`.

use super::ProviderEndpoint;
use crate::types::Metal;

pub fn spot(metal: Metal, base: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        source: "gold-api",
        url: format!("{}/price/{}", base, metal.code()),
        headers: Vec::new(),
        metal_key: metal.code().to_string(),
    }
}
