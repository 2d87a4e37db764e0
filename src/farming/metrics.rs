//! Reward projections derived from a network snapshot and the user's farm.
//!
//! Every function here is pure. A `None` input yields a `None` output; no
//! unknown figure is ever replaced by zero.

use serde::Serialize;

use super::model::{NetworkSnapshot, UserInputs};
use super::plot::footprint_gib;
use super::reward::reward_for_height;
use super::{
    BLOCKS_PER_DAY, BYTES_PER_GIB, CHANCE_WINDOW_DAILY, CHANCE_WINDOW_HOURLY,
    CHANCE_WINDOW_MONTHLY, DAYS_PER_MONTH, HOURS_PER_DAY,
};

pub fn plot_size_gib(inputs: &UserInputs) -> f64 {
    footprint_gib(inputs.proof_size, inputs.compression_level)
}

pub fn owned_storage_bytes(inputs: &UserInputs) -> f64 {
    inputs.unit_count() as f64 * plot_size_gib(inputs) * BYTES_PER_GIB
}

/// Fraction of the netspace owned by the farm. Can exceed 1.
pub fn owned_storage_share(snapshot: &NetworkSnapshot, inputs: &UserInputs) -> Option<f64> {
    let netspace = snapshot.total_network_storage_bytes.filter(|&n| n > 0.0)?;
    Some(owned_storage_bytes(inputs) / netspace)
}

pub fn expected_wins_per_day(snapshot: &NetworkSnapshot, inputs: &UserInputs) -> Option<f64> {
    owned_storage_share(snapshot, inputs).map(|share| share * BLOCKS_PER_DAY)
}

pub fn current_block_reward(snapshot: &NetworkSnapshot) -> Option<f64> {
    snapshot.current_block_height.map(reward_for_height)
}

pub fn expected_time_to_win_days(snapshot: &NetworkSnapshot, inputs: &UserInputs) -> Option<f64> {
    let wins = expected_wins_per_day(snapshot, inputs).filter(|&w| w > 0.0)?;
    Some(1.0 / wins)
}

pub fn earnings_daily(snapshot: &NetworkSnapshot, inputs: &UserInputs) -> Option<f64> {
    Some(expected_wins_per_day(snapshot, inputs)? * current_block_reward(snapshot)?)
}

pub fn earnings_hourly(snapshot: &NetworkSnapshot, inputs: &UserInputs) -> Option<f64> {
    earnings_daily(snapshot, inputs).map(|daily| daily / HOURS_PER_DAY)
}

pub fn earnings_monthly(snapshot: &NetworkSnapshot, inputs: &UserInputs) -> Option<f64> {
    earnings_daily(snapshot, inputs).map(|daily| daily * DAYS_PER_MONTH)
}

/// Converts an XCH amount to USD at the snapshot's price.
pub fn earnings_usd(amount: Option<f64>, snapshot: &NetworkSnapshot) -> Option<f64> {
    Some(amount? * snapshot.coin_price_usd?)
}

/// Probability of winning at least one block within `hours`.
///
/// Wins are a Poisson process with rate `share * BLOCKS_PER_DAY` per day, so
/// the result is `1 - e^(-expected)`. Negative windows count as zero.
pub fn chance_to_win_within(
    hours: f64,
    snapshot: &NetworkSnapshot,
    inputs: &UserInputs,
) -> Option<f64> {
    let share = owned_storage_share(snapshot, inputs)?;
    let expected_blocks = share * BLOCKS_PER_DAY * (hours.max(0.0) / HOURS_PER_DAY);
    Some(-(-expected_blocks).exp_m1())
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Amount {
    pub xch: Option<f64>,
    pub usd: Option<f64>,
}

impl Amount {
    fn priced(xch: Option<f64>, snapshot: &NetworkSnapshot) -> Self {
        Self {
            xch,
            usd: earnings_usd(xch, snapshot),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Earnings {
    pub hourly: Amount,
    pub daily: Amount,
    pub monthly: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WinChances {
    pub hourly: Option<f64>,
    pub daily: Option<f64>,
    pub monthly: Option<f64>,
}

/// Everything the calculator displays for one (snapshot, inputs) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub plot_size_gib: f64,
    pub owned_storage_bytes: f64,
    pub owned_storage_share: Option<f64>,
    pub expected_wins_per_day: Option<f64>,
    pub current_block_reward: Option<f64>,
    pub expected_time_to_win_days: Option<f64>,
    pub earnings: Earnings,
    pub chance_to_win: WinChances,
}

impl DerivedMetrics {
    /// Without a snapshot only the farm-local figures are known.
    pub fn derive(snapshot: Option<&NetworkSnapshot>, inputs: &UserInputs) -> Self {
        let local = Self {
            plot_size_gib: plot_size_gib(inputs),
            owned_storage_bytes: owned_storage_bytes(inputs),
            owned_storage_share: None,
            expected_wins_per_day: None,
            current_block_reward: None,
            expected_time_to_win_days: None,
            earnings: Earnings::default(),
            chance_to_win: WinChances::default(),
        };
        let Some(snap) = snapshot else {
            return local;
        };

        Self {
            owned_storage_share: owned_storage_share(snap, inputs),
            expected_wins_per_day: expected_wins_per_day(snap, inputs),
            current_block_reward: current_block_reward(snap),
            expected_time_to_win_days: expected_time_to_win_days(snap, inputs),
            earnings: Earnings {
                hourly: Amount::priced(earnings_hourly(snap, inputs), snap),
                daily: Amount::priced(earnings_daily(snap, inputs), snap),
                monthly: Amount::priced(earnings_monthly(snap, inputs), snap),
            },
            chance_to_win: WinChances {
                hourly: chance_to_win_within(CHANCE_WINDOW_HOURLY, snap, inputs),
                daily: chance_to_win_within(CHANCE_WINDOW_DAILY, snap, inputs),
                monthly: chance_to_win_within(CHANCE_WINDOW_MONTHLY, snap, inputs),
            },
            ..local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farming::{BYTES_PER_TIB, CompressionLevel, ProofSize};

    fn snapshot(netspace: Option<f64>, price: Option<f64>, height: Option<u64>) -> NetworkSnapshot {
        NetworkSnapshot::new(netspace, price, height)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn owned_bytes_scale_with_unit_count() {
        let inputs = UserInputs::new(10, ProofSize::K32, CompressionLevel::C5);
        let expected = 81.3 * 10.0 * BYTES_PER_GIB;
        assert!((owned_storage_bytes(&inputs) - expected).abs() <= 1.0);

        let double = UserInputs::new(20, ProofSize::K32, CompressionLevel::C5);
        assert!((owned_storage_bytes(&double) - 2.0 * expected).abs() <= 1.0);
    }

    #[test]
    fn unknown_netspace_propagates() {
        let inputs = UserInputs::default();
        for snap in [
            snapshot(None, Some(20.0), Some(1_000_000)),
            snapshot(Some(0.0), Some(20.0), Some(1_000_000)),
            snapshot(Some(-5.0), Some(20.0), Some(1_000_000)),
        ] {
            assert_eq!(owned_storage_share(&snap, &inputs), None);
            assert_eq!(expected_wins_per_day(&snap, &inputs), None);
            assert_eq!(expected_time_to_win_days(&snap, &inputs), None);
            assert_eq!(earnings_daily(&snap, &inputs), None);
            assert_eq!(earnings_hourly(&snap, &inputs), None);
            assert_eq!(earnings_monthly(&snap, &inputs), None);
            assert_eq!(chance_to_win_within(24.0, &snap, &inputs), None);
            // the reward does not depend on netspace
            assert_eq!(current_block_reward(&snap), Some(2.0));
        }
    }

    #[test]
    fn unknown_height_or_price_only_hits_dependents() {
        let inputs = UserInputs::default();
        let snap = snapshot(Some(1000.0 * BYTES_PER_TIB), None, None);

        assert!(expected_wins_per_day(&snap, &inputs).is_some());
        assert_eq!(current_block_reward(&snap), None);
        assert_eq!(earnings_daily(&snap, &inputs), None);
        assert_eq!(earnings_usd(Some(1.0), &snap), None);
        assert_eq!(earnings_usd(None, &snapshot(None, Some(20.0), None)), None);
    }

    #[test]
    fn share_is_not_clamped() {
        let inputs = UserInputs::new(100, ProofSize::K32, CompressionLevel::C0);
        let snap = snapshot(Some(BYTES_PER_TIB), None, Some(0));
        let share = owned_storage_share(&snap, &inputs).unwrap();
        assert!(share > 1.0);
    }

    #[test]
    fn chance_is_zero_without_a_window() {
        let inputs = UserInputs::default();
        let snap = snapshot(Some(1000.0 * BYTES_PER_TIB), None, None);
        assert_eq!(chance_to_win_within(0.0, &snap, &inputs), Some(0.0));
        assert_eq!(chance_to_win_within(-12.0, &snap, &inputs), Some(0.0));
    }

    #[test]
    fn chance_grows_towards_one() {
        // a single plot against a ~28 EiB network
        let inputs = UserInputs::new(1, ProofSize::K32, CompressionLevel::C0);
        let snap = snapshot(Some(30_000_000.0 * BYTES_PER_TIB), None, None);

        let mut last = 0.0;
        for hours in [1.0, 6.0, 24.0, 24.0 * 7.0, 24.0 * 30.0, 24.0 * 365.0] {
            let p = chance_to_win_within(hours, &snap, &inputs).unwrap();
            assert!(p > last, "not increasing at {hours}h");
            assert!(p < 1.0);
            last = p;
        }

        let far = chance_to_win_within(1e9, &snap, &inputs).unwrap();
        assert!(far <= 1.0 && far > 0.999_999);
    }

    #[test]
    fn chance_matches_poisson_not_linear() {
        let inputs = UserInputs::default();
        let snap = snapshot(Some(1000.0 * BYTES_PER_TIB), None, None);
        let wins = expected_wins_per_day(&snap, &inputs).unwrap();

        let p = chance_to_win_within(24.0, &snap, &inputs).unwrap();
        assert!(close(p, 1.0 - (-wins).exp()));
        assert!(p < wins);
    }

    #[test]
    fn end_to_end_projection() {
        let inputs = UserInputs::new(10, ProofSize::K32, CompressionLevel::C0);
        let snap = snapshot(Some(1000.0 * BYTES_PER_TIB), Some(20.0), Some(1_000_000));

        let owned = 10.0 * 101.4 * BYTES_PER_GIB;
        let share = owned / (1000.0 * BYTES_PER_TIB);
        let wins = share * BLOCKS_PER_DAY;
        let daily = wins * 2.0;

        let m = DerivedMetrics::derive(Some(&snap), &inputs);
        assert_eq!(m.plot_size_gib, 101.4);
        assert!(close(m.owned_storage_bytes, owned));
        assert!(close(m.owned_storage_share.unwrap(), share));
        assert!(close(m.expected_wins_per_day.unwrap(), wins));
        assert_eq!(m.current_block_reward, Some(2.0));
        assert!(close(m.expected_time_to_win_days.unwrap(), 1.0 / wins));
        assert!(close(m.earnings.daily.xch.unwrap(), daily));
        assert!(close(m.earnings.daily.usd.unwrap(), daily * 20.0));
        assert!(close(m.earnings.hourly.xch.unwrap(), daily / 24.0));
        assert!(close(m.earnings.monthly.xch.unwrap(), daily * 30.0));
        assert!(close(m.earnings.monthly.usd.unwrap(), daily * 30.0 * 20.0));

        // deterministic
        assert_eq!(m, DerivedMetrics::derive(Some(&snap), &inputs));
    }

    #[test]
    fn without_snapshot_only_local_figures_are_known() {
        let inputs = UserInputs::new(3, ProofSize::K33, CompressionLevel::C2);
        let m = DerivedMetrics::derive(None, &inputs);

        assert_eq!(m.plot_size_gib, 176.6);
        assert!(m.owned_storage_bytes > 0.0);
        assert_eq!(m.owned_storage_share, None);
        assert_eq!(m.current_block_reward, None);
        assert_eq!(m.earnings, Earnings::default());
        assert_eq!(m.chance_to_win, WinChances::default());
    }
}
