//! api.exchangerate.host — free spot and timeframe provider.
//!
//! Treats metals as base currencies: `GET {base}/latest?base=XAU&symbols=USD`
//! returns `{"rates": {"USD": 2400.5}}`; `/timeframe` returns the same
//! date-indexed shape as metalpriceapi.

use super::ProviderEndpoint;
use crate::types::Metal;
use chrono::NaiveDate;

pub fn spot(metal: Metal, base: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        source: "exchangerate-host",
        url: format!("{}/latest?base={}&symbols=USD", base, metal.code()),
        headers: Vec::new(),
        metal_key: metal.code().to_string(),
    }
}

pub fn series(metal: Metal, start: NaiveDate, end: NaiveDate, base: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        source: "exchangerate-host",
        url: format!(
            "{}/timeframe?start_date={}&end_date={}&base={}&symbols=USD",
            base,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            metal.code()
        ),
        headers: Vec::new(),
        metal_key: metal.code().to_string(),
    }
}
