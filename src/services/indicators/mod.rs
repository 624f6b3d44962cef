//! Technical indicators over a resolved price series.
//!
//! Pure functions over an in-memory `&[f64]` of closing prices; numeric
//! semantics (EMA seed, operation order) are fixed for reproducibility.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::{ema, ema_series};
pub use macd::{macd, MacdOutput};
pub use rsi::rsi;
pub use sma::sma;
