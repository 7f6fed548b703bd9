//! Backlog accounting: how many reward intervals one claim may collect.
//!
//! Intervals accrue while nobody claims. The administratively configured
//! cap guarantees a minimum claim window, elapsed whole intervals extend
//! it, and `MAX_REWARDS_AVAILABLE` bounds both.

use super::types::U256;
use super::{MAX_REWARDS_AVAILABLE, REWARD_INTERVAL_SECS};

/// Intervals a claim at `now` may collect, given the last accepted claim
/// at `last_reward_time` and the configured cap.
pub fn rewards_available(last_reward_time: u64, max_rewards: u64, now: u64) -> u64 {
    let elapsed_intervals = now.saturating_sub(last_reward_time) / REWARD_INTERVAL_SECS;
    elapsed_intervals
        .max(max_rewards)
        .min(MAX_REWARDS_AVAILABLE)
}

/// Intervals actually paid: the smaller of what the proof earned and what
/// the backlog allows.
pub fn rewards_to_give(earned: u64, last_reward_time: u64, max_rewards: u64, now: u64) -> u64 {
    earned
        .min(rewards_available(last_reward_time, max_rewards, now))
        .min(MAX_REWARDS_AVAILABLE)
}

/// Strength of a proof expressed in intervals: how many times the achieved
/// value undercuts the target. A zero value is infinitely strong.
pub fn rewards_earned(target: U256, achieved: U256) -> u64 {
    if achieved.is_zero() {
        return u64::MAX;
    }
    (target / achieved).saturating_u64()
}

/// Window over which the configured cap lets rewards accumulate.
pub fn adjustment_interval(max_rewards: u64) -> u64 {
    max_rewards.saturating_mul(REWARD_INTERVAL_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LAST: u64 = 1_600_000_001;

    #[test]
    fn available_with_default_cap() {
        assert_eq!(rewards_available(LAST, 1, LAST + 1), 1);
        assert_eq!(rewards_available(LAST, 1, LAST + 600), 1);
        assert_eq!(rewards_available(LAST, 1, LAST + 1199), 1);
        assert_eq!(rewards_available(LAST, 1, LAST + 1200), 2);
        assert_eq!(rewards_available(LAST, 1, LAST + 1799), 2);
        assert_eq!(rewards_available(LAST, 1, LAST + 1800), 3);
        assert_eq!(rewards_available(LAST, 1, LAST + 2400), 4);
    }

    #[test]
    fn cap_acts_as_minimum_window() {
        assert_eq!(rewards_available(LAST, 2, LAST + 1800), 3);
        assert_eq!(rewards_available(LAST, 3, LAST + 1800), 3);
        assert_eq!(rewards_available(LAST, 3, LAST + 1), 3);
        assert_eq!(rewards_available(LAST, 3, LAST + 2399), 3);
        assert_eq!(rewards_available(LAST, 3, LAST + 2400), 4);
        assert_eq!(rewards_available(LAST, 4, LAST + 2400), 4);
        assert_eq!(rewards_available(LAST, 5, LAST + 2400), 5);
    }

    #[test]
    fn available_respects_hard_ceiling() {
        assert_eq!(rewards_available(LAST, 300, LAST), MAX_REWARDS_AVAILABLE);
        let far = LAST + REWARD_INTERVAL_SECS * (MAX_REWARDS_AVAILABLE + 50);
        assert_eq!(rewards_available(LAST, 1, far), MAX_REWARDS_AVAILABLE);
    }

    #[test]
    fn clock_behind_last_reward_counts_as_no_elapsed_time() {
        assert_eq!(rewards_available(LAST, 2, LAST - 5_000), 2);
    }

    #[test]
    fn to_give_is_bounded_by_earned_and_backlog() {
        let earned = 10;
        assert_eq!(rewards_to_give(earned, LAST, 1, LAST), 1);
        assert_eq!(rewards_to_give(earned, LAST, 2, LAST), 2);
        assert_eq!(rewards_to_give(earned, LAST, 9, LAST), 9);
        assert_eq!(rewards_to_give(earned, LAST, 11, LAST), 10);
        assert_eq!(rewards_to_give(earned, LAST, 20, LAST), 10);
        assert_eq!(rewards_to_give(earned, LAST, 1, LAST + 600), 1);
        assert_eq!(rewards_to_give(earned, LAST, 1, LAST + 2 * 600), 2);
        assert_eq!(rewards_to_give(earned, LAST, 1, LAST + 11 * 600), 10);
        assert_eq!(rewards_to_give(earned, LAST, 2, LAST + 12 * 600), 10);
        assert_eq!(rewards_to_give(earned, LAST, 11, LAST + 11 * 600), 10);
    }

    #[test]
    fn to_give_never_exceeds_ceiling() {
        let max = MAX_REWARDS_AVAILABLE;
        assert_eq!(rewards_to_give(max, LAST, max, LAST), max);
        assert_eq!(rewards_to_give(max + 1, LAST, max + 1, LAST), max);
        assert_eq!(rewards_to_give(u64::MAX, LAST, u64::MAX, u64::MAX), max);
    }

    #[test]
    fn earned_is_target_over_achieved() {
        let target = U256::from(1_000u64);
        assert_eq!(rewards_earned(target, U256::from(1_000u64)), 1);
        assert_eq!(rewards_earned(target, U256::from(999u64)), 1);
        assert_eq!(rewards_earned(target, U256::from(500u64)), 2);
        assert_eq!(rewards_earned(target, U256::from(333u64)), 3);
        assert_eq!(rewards_earned(target, U256::from(2_000u64)), 0);
        assert_eq!(rewards_earned(target, U256::zero()), u64::MAX);
        assert_eq!(rewards_earned(U256::MAX, U256::one()), u64::MAX);
    }

    #[test]
    fn adjustment_interval_scales_with_cap() {
        assert_eq!(adjustment_interval(1), REWARD_INTERVAL_SECS);
        assert_eq!(adjustment_interval(2), 2 * REWARD_INTERVAL_SECS);
    }

    proptest! {
        #[test]
        fn available_is_bounded_and_monotone(
            last in 0u64..=u32::MAX as u64,
            cap in 1u64..=MAX_REWARDS_AVAILABLE,
            elapsed in 0u64..=1_000_000u64,
            step in 0u64..=100_000u64,
        ) {
            let now = last + elapsed;
            let a = rewards_available(last, cap, now);
            let b = rewards_available(last, cap, now + step);
            prop_assert!(a >= 1);
            prop_assert!(a >= cap);
            prop_assert!(a <= MAX_REWARDS_AVAILABLE);
            prop_assert!(b >= a);
        }

        #[test]
        fn to_give_never_exceeds_inputs(
            earned in 0u64..=1_000u64,
            cap in 1u64..=MAX_REWARDS_AVAILABLE,
            elapsed in 0u64..=1_000_000u64,
        ) {
            let given = rewards_to_give(earned, 0, cap, elapsed);
            prop_assert!(given <= earned);
            prop_assert!(given <= rewards_available(0, cap, elapsed));
        }
    }
}
