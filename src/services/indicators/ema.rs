//! Exponential moving average.

/// Full EMA series: seeded with the first value, smoothing constant
/// `k = 2/(period+1)`. Output has the same length as the input.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);
    for &value in &values[1..] {
        prev = value * k + prev * (1.0 - k);
        out.push(prev);
    }
    out
}

/// Latest EMA value; considered valid only with at least `period` points.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    ema_series(values, period).last().copied()
}
