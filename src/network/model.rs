use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::farming::{BYTES_PER_TIB, PoolBlock, PoolSummary};

/* ---------- Pool stats API (upstream) ---------- */

#[derive(Debug, Deserialize)]
pub struct PoolStatsResponse {
    pub status: String,
    pub data: PoolStatsData,
}

impl PoolStatsResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("OK")
    }

    pub fn netspace_bytes(&self) -> Option<f64> {
        self.data
            .xch
            .netspace_tib
            .as_ref()
            .and_then(Netspace::tib)
            .map(|tib| tib * BYTES_PER_TIB)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatsData {
    pub xch: XchStats,
    #[serde(default)]
    pub pool_stats: Option<PoolStats>,
    #[serde(default)]
    pub last_blocks: Option<Vec<LastBlock>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XchStats {
    #[serde(default)]
    pub usdt: Option<f64>,
    #[serde(default)]
    pub peak_height: Option<u64>,
    #[serde(default, rename = "netspaceTiB")]
    pub netspace_tib: Option<Netspace>,
}

/// The API reports netspace either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Netspace {
    Number(f64),
    Text(String),
}

impl Netspace {
    pub fn tib(&self) -> Option<f64> {
        let value = match self {
            Netspace::Number(n) => *n,
            Netspace::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStats {
    #[serde(rename = "poolSpaceTiB")]
    pub pool_space_tib: f64,
    pub farmers: u64,
    pub current_fee_type: String,
    pub current_fee: f64,
}

impl From<PoolStats> for PoolSummary {
    fn from(stats: PoolStats) -> Self {
        Self {
            pool_space_tib: stats.pool_space_tib,
            farmers: stats.farmers,
            current_fee_type: stats.current_fee_type,
            current_fee: stats.current_fee,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LastBlock {
    pub height: u64,
    #[serde(default)]
    pub received_height: Option<u64>,
    pub farmer: String,
    #[serde(default)]
    pub datetime: Option<String>,
}

impl From<LastBlock> for PoolBlock {
    fn from(block: LastBlock) -> Self {
        Self {
            height: block.height,
            received_height: block.received_height,
            farmer: block.farmer,
            datetime: block
                .datetime
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
