use std::time::Duration;

use crate::network::DEFAULT_POOL_STATS_URL;

/// Minimum time a refresh appears to take, so clients don't flicker.
pub const DEFAULT_REFRESH_MIN_MS: u64 = 600;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub pool_stats_url: String,
    pub fetch_timeout: Duration,
    pub refresh_min: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or unparsable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            pool_stats_url: lookup("POOL_STATS_URL")
                .unwrap_or_else(|| DEFAULT_POOL_STATS_URL.to_string()),
            fetch_timeout: Duration::from_secs(
                parsed("FETCH_TIMEOUT_SECS").unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
            ),
            refresh_min: Duration::from_millis(
                parsed("REFRESH_MIN_MS").unwrap_or(DEFAULT_REFRESH_MIN_MS),
            ),
        }
    }
}
