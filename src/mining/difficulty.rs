//! Per-claim retargeting.
//!
//! After every accepted claim the target moves one step of 1% in the
//! direction that brings the mean time between claims back to
//! `REWARD_INTERVAL_SECS`. The comparison point is `61/88` of the
//! expected interval (close to `ln 2`), i.e. the controller steers the
//! *median* of an exponential inter-arrival time, which puts the mean on
//! target.

use log::debug;

use super::types::U256;
use super::{MAXIMUM_TARGET, MINIMUM_TARGET, REWARD_INTERVAL_SECS};

const ELAPSED_WEIGHT: u128 = 88;
const EXPECTED_WEIGHT: u128 = 61;

/// Force a target into `[MINIMUM_TARGET, MAXIMUM_TARGET]`.
pub fn clamp_target(target: U256) -> U256 {
    target.max(MINIMUM_TARGET).min(MAXIMUM_TARGET)
}

/// Retarget after `rewards_given_now` intervals were paid at `now` for a
/// claim whose predecessor landed at `last_reward_time`.
///
/// Never fails: the output is always clamped into the global bounds,
/// whatever the input target.
pub fn adjust_difficulty(
    target: U256,
    last_reward_time: u64,
    rewards_given_now: u64,
    now: u64,
) -> U256 {
    let elapsed = now.saturating_sub(last_reward_time) as u128;
    let observed = elapsed * ELAPSED_WEIGHT;
    let expected = rewards_given_now as u128 * REWARD_INTERVAL_SECS as u128 * EXPECTED_WEIGHT;

    // An overflowing product is far above MAXIMUM_TARGET, so saturate and
    // let the clamp settle it.
    let adjusted = if observed < expected {
        target
            .checked_mul(U256::from(99u64))
            .map_or(U256::MAX, |t| t / 100u64)
    } else if observed > expected {
        target
            .checked_mul(U256::from(100u64))
            .map_or(U256::MAX, |t| t / 99u64)
    } else {
        target
    };

    let next = clamp_target(adjusted);
    debug!(
        "retarget elapsed={}s rewards={} target {:#x} -> {:#x}",
        elapsed, rewards_given_now, target, next
    );
    next
}

/// Work factor relative to the easiest possible target: `(2^256 - 1) / target`.
pub fn mining_difficulty(target: U256) -> U256 {
    if target.is_zero() {
        return U256::MAX;
    }
    U256::MAX / target
}
