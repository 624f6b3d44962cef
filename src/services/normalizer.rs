//! Response normalization.
//!
//! Upstream providers answer in at least four different JSON shapes: a bare
//! number, an array of numbers, an array of objects, and an object with
//! nested rate fields. A single classification pass tags the payload, then
//! per-variant extraction runs a fixed precedence. Anything that is not a
//! finite positive number is treated as absent.

use crate::types::{PriceSeries, TimeSeriesPoint};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Shape of an upstream payload, determined in one pass.
enum Shape<'a> {
    Number(f64),
    Array(&'a [Value]),
    Object(&'a Map<String, Value>),
    Unknown,
}

fn classify(value: &Value) -> Shape<'_> {
    match value {
        Value::Number(n) => n.as_f64().map(Shape::Number).unwrap_or(Shape::Unknown),
        Value::Array(items) => Shape::Array(items),
        Value::Object(map) => Shape::Object(map),
        _ => Shape::Unknown,
    }
}

/// A usable price is finite and strictly positive. Zero and negative values
/// are always parsing artifacts, never quotes.
fn usable(n: f64) -> Option<f64> {
    (n.is_finite() && n > 0.0).then_some(n)
}

fn as_price(value: &Value) -> Option<f64> {
    value.as_f64().and_then(usable)
}

/// Extract a single USD price from an arbitrary provider payload.
///
/// Precedence: bare number; array (last element, by most-recent-data-point
/// convention); object fields `price`, `rate`, `rates.USD`, `data.rates.USD`,
/// the provider's own metal key, then the first numeric value in the object.
pub fn extract_price(body: &Value, metal_key: &str) -> Option<f64> {
    match classify(body) {
        Shape::Number(n) => usable(n),
        Shape::Array(items) => extract_from_array(items, metal_key),
        Shape::Object(map) => extract_from_object(map, metal_key),
        Shape::Unknown => None,
    }
}

fn extract_from_array(items: &[Value], metal_key: &str) -> Option<f64> {
    let last = items.last()?;
    match classify(last) {
        Shape::Number(n) => usable(n),
        // Candle-style inner array: the last finite number wins.
        Shape::Array(inner) => inner.iter().rev().find_map(as_price),
        Shape::Object(map) => extract_from_object(map, metal_key),
        Shape::Unknown => None,
    }
}

fn extract_from_object(map: &Map<String, Value>, metal_key: &str) -> Option<f64> {
    if let Some(n) = map.get("price").and_then(as_price) {
        return Some(n);
    }
    if let Some(n) = map.get("rate").and_then(as_price) {
        return Some(n);
    }
    if let Some(n) = map
        .get("rates")
        .and_then(|rates| rates.get("USD"))
        .and_then(as_price)
    {
        return Some(n);
    }
    if let Some(n) = map
        .get("data")
        .and_then(|data| data.get("rates"))
        .and_then(|rates| rates.get("USD"))
        .and_then(as_price)
    {
        return Some(n);
    }
    if let Some(n) = map.get(metal_key).and_then(as_price) {
        return Some(n);
    }
    // Last resort: first numeric value anywhere in the object.
    map.values().find_map(as_price)
}

fn parse_iso_date(s: &str) -> Option<i64> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Normalize a historical payload into an ascending price series.
///
/// Handles date-indexed rate maps (`{"rates": {"YYYY-MM-DD": {"USD": n}}}`,
/// values optionally bare numbers) and arrays of `{price, timestamp|date}`
/// objects. Providers do not guarantee ordering, so the result is sorted;
/// non-positive prices are dropped.
pub fn extract_series(body: &Value) -> PriceSeries {
    let mut points: PriceSeries = Vec::new();

    if let Some(rates) = body.get("rates").and_then(Value::as_object) {
        for (date, entry) in rates {
            let price = match classify(entry) {
                Shape::Number(n) => usable(n),
                Shape::Object(map) => map.get("USD").and_then(as_price),
                _ => None,
            };
            if let (Some(price), Some(ts)) = (price, parse_iso_date(date)) {
                points.extend(TimeSeriesPoint::new(price, ts));
            }
        }
    } else if let Some(items) = body.as_array() {
        for item in items {
            let price = item.get("price").and_then(as_price);
            let ts = item
                .get("timestamp")
                .and_then(Value::as_i64)
                .or_else(|| item.get("date").and_then(Value::as_str).and_then(parse_iso_date));
            if let (Some(price), Some(ts)) = (price, ts) {
                points.extend(TimeSeriesPoint::new(price, ts));
            }
        }
    }

    points.sort_by_key(|p| p.timestamp);
    points
}

/// Pull a currency→rate table out of an FX payload (`rates` or `data.rates`),
/// keeping only finite positive entries.
pub fn extract_rates(body: &Value) -> BTreeMap<String, f64> {
    let rates = body
        .get("rates")
        .or_else(|| body.get("data").and_then(|data| data.get("rates")));

    let Some(map) = rates.and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    map.iter()
        .filter_map(|(symbol, value)| as_price(value).map(|rate| (symbol.clone(), rate)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_bare_number() {
        assert_eq!(extract_price(&json!(2400.5), "XAU"), Some(2400.5));
    }

    #[test]
    fn test_extract_array_shapes() {
        assert_eq!(extract_price(&json!([2400.5]), "XAU"), Some(2400.5));
        assert_eq!(extract_price(&json!([1.0, 2.0, 2400.5]), "XAU"), Some(2400.5));
        assert_eq!(extract_price(&json!([[1, 2, 2400.5]]), "XAU"), Some(2400.5));
        assert_eq!(
            extract_price(&json!([{"price": 2400.5}]), "XAU"),
            Some(2400.5)
        );
    }

    #[test]
    fn test_extract_object_precedence() {
        assert_eq!(extract_price(&json!({"price": 2400.5}), "XAU"), Some(2400.5));
        assert_eq!(extract_price(&json!({"rate": 2400.5}), "XAU"), Some(2400.5));
        assert_eq!(
            extract_price(&json!({"rates": {"USD": 2400.5}}), "XAU"),
            Some(2400.5)
        );
        assert_eq!(
            extract_price(&json!({"data": {"rates": {"USD": 2400.5}}}), "XAU"),
            Some(2400.5)
        );
        assert_eq!(extract_price(&json!({"XAU": 2400.5}), "XAU"), Some(2400.5));
        // `price` beats the dynamic metal key.
        assert_eq!(
            extract_price(&json!({"XAU": 1.0, "price": 2400.5}), "XAU"),
            Some(2400.5)
        );
    }

    #[test]
    fn test_extract_generic_fallback() {
        assert_eq!(
            extract_price(&json!({"ask": 2400.5, "name": "Gold"}), "XAU"),
            Some(2400.5)
        );
    }

    #[test]
    fn test_never_returns_non_positive() {
        let bodies = [
            json!(0),
            json!(-5.0),
            json!({"price": 0}),
            json!({"price": -2400.5}),
            json!({"price": "2400.5"}),
            json!({"rates": {"USD": 0}}),
            json!([0, -1]),
            json!(null),
            json!("2400.5"),
            json!({}),
            json!([]),
        ];
        for body in &bodies {
            assert_eq!(extract_price(body, "XAU"), None, "body: {}", body);
        }
    }

    #[test]
    fn test_series_sorted_regardless_of_input_order() {
        let body = json!({"rates": {
            "2024-01-03": {"USD": 2060.0},
            "2024-01-01": {"USD": 2040.0},
            "2024-01-02": {"USD": 2050.0},
        }});
        let series = extract_series(&body);
        assert_eq!(series.len(), 3);
        assert!(series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(series[0].date, "2024-01-01");
        assert_eq!(series[2].price, 2060.0);
    }

    #[test]
    fn test_series_drops_bad_points() {
        let body = json!({"rates": {
            "2024-01-01": {"USD": 2040.0},
            "2024-01-02": {"USD": 0.0},
            "2024-01-03": {"USD": -3.0},
            "not-a-date": {"USD": 2060.0},
        }});
        let series = extract_series(&body);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].price, 2040.0);
    }

    #[test]
    fn test_series_from_point_array() {
        let body = json!([
            {"price": 2050.0, "timestamp": 1704240000},
            {"price": 2040.0, "date": "2024-01-01"},
        ]);
        let series = extract_series(&body);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].price, 2040.0);
    }

    #[test]
    fn test_rates_table_filters_junk() {
        let body = json!({"rates": {"EUR": 0.92, "GBP": 0.79, "BAD": -1.0, "STR": "x"}});
        let rates = extract_rates(&body);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates.get("EUR"), Some(&0.92));
    }

    #[test]
    fn test_rates_table_nested_under_data() {
        let body = json!({"data": {"rates": {"EUR": 0.92}}});
        assert_eq!(extract_rates(&body).get("EUR"), Some(&0.92));
    }
}
