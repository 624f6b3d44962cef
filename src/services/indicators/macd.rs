//! MACD (Moving Average Convergence Divergence).

use super::ema::ema_series;

const FAST_PERIOD: usize = 12;
const SLOW_PERIOD: usize = 26;
const SIGNAL_PERIOD: usize = 9;

/// MACD line, signal line, and histogram at the latest point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct MacdOutput {
    /// EMA(12) - EMA(26).
    pub macd: f64,
    /// EMA(9) of the MACD line.
    pub signal: f64,
    /// MACD - signal, exactly.
    pub histogram: f64,
}

/// Compute MACD(12, 26, 9); `None` below 35 points.
pub fn macd(values: &[f64]) -> Option<MacdOutput> {
    if values.len() < SLOW_PERIOD + SIGNAL_PERIOD {
        return None;
    }

    let fast = ema_series(values, FAST_PERIOD);
    let slow = ema_series(values, SLOW_PERIOD);

    // Both series are input-length, so the MACD line aligns element-wise.
    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_series = ema_series(&line, SIGNAL_PERIOD);

    let macd = *line.last()?;
    let signal = *signal_series.last()?;

    Some(MacdOutput {
        macd,
        signal,
        histogram: macd - signal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_insufficient_data() {
        let values: Vec<f64> = (0..34).map(|i| i as f64).collect();
        assert!(macd(&values).is_none());
    }

    #[test]
    fn test_macd_histogram_identity() {
        let values: Vec<f64> = (0..60)
            .map(|i| 2000.0 + (i as f64 * 0.7).sin() * 50.0 + i as f64)
            .collect();
        let output = macd(&values).unwrap();
        // Exact, not approximate.
        assert_eq!(output.histogram, output.macd - output.signal);
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let values: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let output = macd(&values).unwrap();
        assert!(output.macd > 0.0, "macd was {}", output.macd);
    }

    #[test]
    fn test_macd_negative_in_downtrend() {
        let values: Vec<f64> = (0..60).map(|i| 500.0 - i as f64 * 2.0).collect();
        let output = macd(&values).unwrap();
        assert!(output.macd < 0.0, "macd was {}", output.macd);
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let values = [100.0; 60];
        let output = macd(&values).unwrap();
        assert_eq!(output.macd, 0.0);
        assert_eq!(output.signal, 0.0);
        assert_eq!(output.histogram, 0.0);
    }
}
