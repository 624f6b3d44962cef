pub mod cache;
pub mod fetcher;
pub mod fx;
pub mod history;
pub mod indicators;
pub mod normalizer;
pub mod resolver;

pub use cache::Cache;
pub use fx::{FxResolver, RateTable};
pub use history::SeriesResolver;
pub use resolver::{Freshness, PriceResolver, ResolveError, SpotResult};
