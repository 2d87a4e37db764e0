pub mod metrics;
pub mod model;
pub mod plot;
pub mod reward;

pub use metrics::DerivedMetrics;
pub use model::{NetworkSnapshot, PoolBlock, PoolSummary, UserInputs};
pub use plot::{CompressionLevel, ProofSize};

/// Expected blocks per day on mainnet (target interval of 18.75s).
pub const BLOCKS_PER_DAY: f64 = 4608.0;

/// Block reward before the first halving, in XCH.
pub const BASE_REWARD: f64 = 2.0;

/// Heights at which the block reward halves (ascending).
pub const HALVING_HEIGHTS: [u64; 4] = [5_045_760, 10_091_520, 15_137_280, 20_183_040];

pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;
pub const BYTES_PER_TIB: f64 = BYTES_PER_GIB * 1024.0;

pub const HOURS_PER_DAY: f64 = 24.0;

/// Flat month used for monthly projections (not calendar accurate).
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Windows (in hours) for the fixed chance-to-win figures.
pub const CHANCE_WINDOW_HOURLY: f64 = 1.0;
pub const CHANCE_WINDOW_DAILY: f64 = HOURS_PER_DAY;
pub const CHANCE_WINDOW_MONTHLY: f64 = HOURS_PER_DAY * DAYS_PER_MONTH;
