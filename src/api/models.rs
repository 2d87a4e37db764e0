use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::farming::{CompressionLevel, DerivedMetrics, NetworkSnapshot, ProofSize, UserInputs};
use crate::network::FetchError;
use crate::session::SessionStatus;

/* ---------- Inputs API Models ---------- */

/// Partial update; omitted fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInputsRequest {
    /// Signed so that 0 or negative counts can be clamped instead of rejected.
    pub unit_count: Option<i64>,
    pub proof_size: Option<ProofSize>,
    pub compression_level: Option<CompressionLevel>,
}

#[derive(Serialize)]
pub struct InputsResponse {
    pub unit_count: u64,
    pub proof_size: ProofSize,
    pub compression_level: CompressionLevel,
    pub label: String,
}

impl From<UserInputs> for InputsResponse {
    fn from(inputs: UserInputs) -> Self {
        Self {
            unit_count: inputs.unit_count(),
            proof_size: inputs.proof_size,
            compression_level: inputs.compression_level,
            label: format!(
                "{} x {} {}",
                inputs.unit_count(),
                inputs.proof_size,
                inputs.compression_level
            ),
        }
    }
}

/* ---------- Snapshot API Models ---------- */

#[derive(Serialize)]
pub struct ErrorDescriptor {
    pub kind: &'static str,
    pub message: String,
}

impl From<&FetchError> for ErrorDescriptor {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct SnapshotResponse<'a> {
    pub snapshot: Option<&'a NetworkSnapshot>,
    pub last_updated: Option<DateTime<Utc>>,
    pub refreshing: bool,
    pub error: Option<ErrorDescriptor>,
}

impl<'a> From<&'a SessionStatus> for SnapshotResponse<'a> {
    fn from(status: &'a SessionStatus) -> Self {
        Self {
            snapshot: status.snapshot.as_deref(),
            last_updated: status.last_updated,
            refreshing: status.refreshing,
            error: status.last_error.as_ref().map(ErrorDescriptor::from),
        }
    }
}

#[derive(Serialize)]
pub struct RefreshResponse<'a> {
    pub published: bool,
    #[serde(flatten)]
    pub status: SnapshotResponse<'a>,
}

/* ---------- Metrics API Models ---------- */

#[derive(Serialize)]
pub struct MetricsResponse {
    pub inputs: InputsResponse,
    pub last_updated: Option<DateTime<Utc>>,
    pub halving_era: Option<u32>,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

#[derive(Serialize)]
pub struct ChanceResponse {
    pub hours: f64,
    pub chance: Option<f64>,
}

/* ---------- Plot size table ---------- */

#[derive(Serialize)]
pub struct PlotSizeRow {
    pub proof_size: ProofSize,
    pub compression_level: CompressionLevel,
    pub label: String,
    pub size_gib: f64,
}

#[derive(Serialize)]
pub struct PlotSizesResponse {
    pub proof_sizes: Vec<ProofSize>,
    pub compression_levels: Vec<CompressionLevel>,
    pub plots: Vec<PlotSizeRow>,
}
