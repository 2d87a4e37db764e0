pub mod fetcher;
pub mod model;

pub use fetcher::{FetchError, Fetcher};

/// Pool whose public stats feed the calculator.
pub const DEFAULT_POOL_STATS_URL: &str = "https://spacefarmers.io/api/pool/stats";
