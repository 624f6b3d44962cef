//! metalpriceapi.com — authenticated spot and timeframe provider.
//!
//! Spot: `GET {base}/v1/latest?api_key=..&base=XAU&currencies=USD` returns
//! `{"rates": {"USD": 2400.5}}`.
//! Timeframe: `GET {base}/v1/timeframe?...` returns a date-indexed map
//! `{"rates": {"2024-01-02": {"USD": 2050.0}, ...}}`.

use super::ProviderEndpoint;
use crate::types::Metal;
use chrono::NaiveDate;

pub fn spot(metal: Metal, api_key: &str, base: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        source: "metalpriceapi",
        url: format!(
            "{}/v1/latest?api_key={}&base={}&currencies=USD",
            base,
            api_key,
            metal.code()
        ),
        headers: Vec::new(),
        metal_key: metal.code().to_string(),
    }
}

pub fn series(
    metal: Metal,
    start: NaiveDate,
    end: NaiveDate,
    api_key: &str,
    base: &str,
) -> ProviderEndpoint {
    ProviderEndpoint {
        source: "metalpriceapi",
        url: format!(
            "{}/v1/timeframe?api_key={}&start_date={}&end_date={}&base={}&currencies=USD",
            base,
            api_key,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            metal.code()
        ),
        headers: Vec::new(),
        metal_key: metal.code().to_string(),
    }
}
