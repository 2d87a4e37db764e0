use chrono::{DateTime, Utc};
use serde::Serialize;

use super::plot::{CompressionLevel, ProofSize};

/// Network state as reported by the pool stats API at `fetched_at`.
///
/// `None` means "unknown" and is carried through every derived figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    pub total_network_storage_bytes: Option<f64>,
    pub coin_price_usd: Option<f64>,
    pub current_block_height: Option<u64>,
    pub fetched_at: DateTime<Utc>,
    pub pool: Option<PoolSummary>,
    pub recent_blocks: Vec<PoolBlock>,
}

impl NetworkSnapshot {
    #[cfg(test)]
    pub fn new(
        total_network_storage_bytes: Option<f64>,
        coin_price_usd: Option<f64>,
        current_block_height: Option<u64>,
    ) -> Self {
        Self {
            total_network_storage_bytes,
            coin_price_usd,
            current_block_height,
            fetched_at: Utc::now(),
            pool: None,
            recent_blocks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSummary {
    pub pool_space_tib: f64,
    pub farmers: u64,
    pub current_fee_type: String,
    pub current_fee: f64,
}

/// A block recently won by the pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolBlock {
    pub height: u64,
    pub received_height: Option<u64>,
    pub farmer: String,
    pub datetime: Option<DateTime<Utc>>,
}

pub const DEFAULT_UNIT_COUNT: u64 = 10;

/// Farm declared by the user. Unit count is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserInputs {
    unit_count: u64,
    pub proof_size: ProofSize,
    pub compression_level: CompressionLevel,
}

impl Default for UserInputs {
    fn default() -> Self {
        Self::new(
            DEFAULT_UNIT_COUNT as i64,
            ProofSize::default(),
            CompressionLevel::default(),
        )
    }
}

impl UserInputs {
    pub fn new(unit_count: i64, proof_size: ProofSize, compression_level: CompressionLevel) -> Self {
        let mut inputs = Self {
            unit_count: 1,
            proof_size,
            compression_level,
        };
        inputs.set_unit_count(unit_count);
        inputs
    }

    pub fn unit_count(&self) -> u64 {
        self.unit_count
    }

    /// Anything below 1 becomes 1; positive counts are kept as given.
    pub fn set_unit_count(&mut self, count: i64) {
        self.unit_count = count.max(1).unsigned_abs();
    }
}
