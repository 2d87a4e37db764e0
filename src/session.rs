use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::farming::metrics::chance_to_win_within;
use crate::farming::{DerivedMetrics, NetworkSnapshot, UserInputs};
use crate::network::{FetchError, Fetcher};

/// What happened to a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Published,
    /// A newer refresh already published; this result was dropped.
    Stale,
}

/// Point-in-time view of the session for clients.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    pub snapshot: Option<Arc<NetworkSnapshot>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<FetchError>,
    pub refreshing: bool,
}

#[derive(Debug, Default)]
struct Published {
    snapshot: Option<Arc<NetworkSnapshot>>,
    snapshot_ticket: u64,
    last_error: Option<FetchError>,
    error_ticket: u64,
}

/// In-memory calculator session: the user's farm, the latest network
/// snapshot and the refresh bookkeeping.
///
/// Every refresh takes a ticket when it starts. Results are published only
/// if their ticket is newer than the one already published, so a slow
/// response can never replace a fresher snapshot.
#[derive(Debug)]
pub struct Session {
    fetcher: Fetcher,
    refresh_min: Duration,
    inputs: Mutex<UserInputs>,
    published: Mutex<Published>,
    next_ticket: AtomicU64,
    in_flight: AtomicUsize,
    initial_load: AtomicBool,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Session {
    pub fn new(fetcher: Fetcher, refresh_min: Duration) -> Self {
        Self {
            fetcher,
            refresh_min,
            inputs: Mutex::new(UserInputs::default()),
            published: Mutex::new(Published::default()),
            next_ticket: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            initial_load: AtomicBool::new(false),
        }
    }

    pub fn inputs(&self) -> UserInputs {
        *self.inputs.lock().expect("mutex poisoned")
    }

    /// Apply a change to the user's inputs and return the result.
    pub fn update_inputs(&self, change: impl FnOnce(&mut UserInputs)) -> UserInputs {
        let mut inputs = self.inputs.lock().expect("mutex poisoned");
        change(&mut inputs);
        *inputs
    }

    pub fn snapshot(&self) -> Option<Arc<NetworkSnapshot>> {
        self.published
            .lock()
            .expect("mutex poisoned")
            .snapshot
            .clone()
    }

    pub fn status(&self) -> SessionStatus {
        let published = self.published.lock().expect("mutex poisoned");
        SessionStatus {
            last_updated: published.snapshot.as_ref().map(|s| s.fetched_at),
            snapshot: published.snapshot.clone(),
            last_error: published.last_error.clone(),
            refreshing: self.in_flight.load(Ordering::SeqCst) > 0,
        }
    }

    /// Recomputed on every call from the current inputs and snapshot.
    pub fn metrics(&self) -> DerivedMetrics {
        let snapshot = self.snapshot();
        DerivedMetrics::derive(snapshot.as_deref(), &self.inputs())
    }

    pub fn chance_to_win_within(&self, hours: f64) -> Option<f64> {
        let snapshot = self.snapshot()?;
        chance_to_win_within(hours, &snapshot, &self.inputs())
    }

    /// Fetch once if nothing has been loaded or attempted yet.
    pub async fn load_if_needed(&self) {
        if self.snapshot().is_some() || self.initial_load.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.refresh().await {
            debug!("initial load failed: {e}");
        }
    }

    /// Fetch a new snapshot and publish it if nothing newer got there first.
    ///
    /// On failure the current snapshot stays in place and the error is kept
    /// for clients. The call takes at least `refresh_min` either way.
    pub async fn refresh(&self) -> Result<RefreshOutcome, FetchError> {
        self.initial_load.store(true, Ordering::SeqCst);
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight::enter(&self.in_flight);
        let start = Instant::now();

        debug!("REFRESH #{ticket} - fetching {}", self.fetcher.url());
        let result = self.fetcher.fetch_snapshot().await;
        let outcome = self.complete(ticket, result);

        let remaining = self.refresh_min.saturating_sub(start.elapsed());
        if !remaining.is_zero() {
            actix_web::rt::time::sleep(remaining).await;
        }
        outcome
    }

    fn complete(
        &self,
        ticket: u64,
        result: Result<NetworkSnapshot, FetchError>,
    ) -> Result<RefreshOutcome, FetchError> {
        let mut published = self.published.lock().expect("mutex poisoned");

        match result {
            Ok(snapshot) if ticket > published.snapshot_ticket => {
                info!(
                    "REFRESH #{ticket} - published height={:?} netspace={:?} price={:?}",
                    snapshot.current_block_height,
                    snapshot.total_network_storage_bytes,
                    snapshot.coin_price_usd
                );
                published.snapshot = Some(Arc::new(snapshot));
                published.snapshot_ticket = ticket;
                if published.error_ticket < ticket {
                    published.last_error = None;
                }
                Ok(RefreshOutcome::Published)
            }
            Ok(_) => {
                warn!(
                    "REFRESH #{ticket} - discarded, #{} already published",
                    published.snapshot_ticket
                );
                Ok(RefreshOutcome::Stale)
            }
            Err(e) => {
                warn!("REFRESH #{ticket} - {e}");
                if ticket > published.snapshot_ticket && ticket > published.error_ticket {
                    published.last_error = Some(e.clone());
                    published.error_ticket = ticket;
                }
                Err(e)
            }
        }
    }
}
