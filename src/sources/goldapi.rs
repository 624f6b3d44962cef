//! goldapi.io — authenticated spot provider.
//!
//! `GET {base}/api/XAU/USD` with an `x-access-token` header returns
//! `{"price": 2400.5, ...}`.

use super::ProviderEndpoint;
use crate::types::Metal;

pub fn spot(metal: Metal, api_key: &str, base: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        source: "goldapi",
        url: format!("{}/api/{}/USD", base, metal.code()),
        headers: vec![("x-access-token", api_key.to_string())],
        metal_key: metal.code().to_string(),
    }
}
