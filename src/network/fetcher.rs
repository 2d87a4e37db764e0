use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::model::PoolStatsResponse;
use crate::farming::NetworkSnapshot;

/// Why a snapshot could not be fetched. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network failure or a non-2xx status from the pool API.
    #[error("pool stats request failed: {0}")]
    Transport(String),
    /// Body was not valid pool stats (bad JSON, non-OK status, missing figures).
    #[error("pool stats response rejected: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Parse(_) => "parse",
        }
    }
}

/// Pulls network statistics from the pool stats endpoint.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    url: String,
}

impl Fetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_snapshot(&self) -> Result<NetworkSnapshot, FetchError> {
        let t0 = Instant::now();
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("upstream returned HTTP {status}")));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!(
            "FETCH {} - {} bytes in {:?}",
            self.url,
            body.len(),
            t0.elapsed()
        );

        parse_snapshot(&body, Utc::now())
    }
}

/// Validate a pool stats body and turn it into a snapshot.
///
/// Requires `status == "OK"` (any case), a peak height and a netspace figure
/// given as a number or a numeric string. The coin price may be missing.
pub fn parse_snapshot(body: &[u8], fetched_at: DateTime<Utc>) -> Result<NetworkSnapshot, FetchError> {
    let decoded: PoolStatsResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if !decoded.is_ok() {
        return Err(FetchError::Parse(format!(
            "unexpected status {:?}",
            decoded.status
        )));
    }

    let netspace = decoded
        .netspace_bytes()
        .ok_or_else(|| FetchError::Parse("netspaceTiB missing or not numeric".into()))?;
    let height = decoded
        .data
        .xch
        .peak_height
        .ok_or_else(|| FetchError::Parse("peakHeight missing".into()))?;

    let data = decoded.data;
    Ok(NetworkSnapshot {
        total_network_storage_bytes: Some(netspace),
        coin_price_usd: data.xch.usdt,
        current_block_height: Some(height),
        fetched_at,
        pool: data.pool_stats.map(Into::into),
        recent_blocks: data
            .last_blocks
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect(),
    })
}
