use super::{BASE_REWARD, HALVING_HEIGHTS};

/// Number of halvings that have happened at `height` (0..=4).
pub fn halving_era(height: u64) -> u32 {
    HALVING_HEIGHTS.iter().filter(|&&h| height >= h).count() as u32
}

/// Per-block farmer reward in XCH at the given height.
///
/// Each interval is right-exclusive: the reward halves exactly at the
/// threshold height and stays at `BASE_REWARD / 16` after the last one.
pub fn reward_for_height(height: u64) -> f64 {
    BASE_REWARD / f64::from(1u32 << halving_era(height))
}
