pub mod metal;
pub mod price;

pub use metal::Metal;
pub use price::{PriceQuote, PriceSeries, TimeSeriesPoint};
