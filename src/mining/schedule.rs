//! Era schedule: halving of the per-interval reward over wall-clock time.
//!
//! The first era is shorter (`FIRST_ERA_SECS`); every later era lasts
//! `ERA_SECS`. The reward halves at each boundary and, once the shift
//! drops it below one base unit, stays at zero forever.

use super::types::U256;
use super::{INITIAL_REWARD, REWARD_INTERVAL_SECS};

pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Length of era 0.
pub const FIRST_ERA_SECS: u64 = SECONDS_PER_YEAR * 3 / 4;

/// Length of every era after the first.
pub const ERA_SECS: u64 = 3 * SECONDS_PER_YEAR;

/// Pure functions of time, anchored at the contract creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraSchedule {
    genesis: u64,
}

impl EraSchedule {
    pub fn new(genesis: u64) -> Self {
        Self { genesis }
    }

    pub fn genesis(&self) -> u64 {
        self.genesis
    }

    /// 0-based era index at time `t`. Times before genesis are era 0.
    pub fn era_at(&self, t: u64) -> u64 {
        let elapsed = t.saturating_sub(self.genesis);
        if elapsed < FIRST_ERA_SECS {
            0
        } else {
            1 + (elapsed - FIRST_ERA_SECS) / ERA_SECS
        }
    }

    /// Reward paid per interval at time `t`: `INITIAL_REWARD >> era`.
    pub fn reward_at(&self, t: u64) -> U256 {
        let era = self.era_at(t);
        if era >= 256 {
            return U256::zero();
        }
        U256::from(INITIAL_REWARD) >> (era as usize)
    }

    /// Number of whole reward intervals that would have completed by `t`
    /// had one been paid exactly every `REWARD_INTERVAL_SECS`, counted
    /// era by era.
    pub fn scheduled_reward_count(&self, t: u64) -> u64 {
        let elapsed = t.saturating_sub(self.genesis);
        if elapsed < FIRST_ERA_SECS {
            return elapsed / REWARD_INTERVAL_SECS;
        }
        let since_first = elapsed - FIRST_ERA_SECS;
        let full_eras = since_first / ERA_SECS;
        let into_era = since_first % ERA_SECS;

        FIRST_ERA_SECS / REWARD_INTERVAL_SECS
            + full_eras * (ERA_SECS / REWARD_INTERVAL_SECS)
            + into_era / REWARD_INTERVAL_SECS
    }

    /// Start time of the era containing `t`.
    pub fn era_start(&self, t: u64) -> u64 {
        match self.era_at(t) {
            0 => self.genesis,
            era => self.genesis + FIRST_ERA_SECS + (era - 1) * ERA_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const START: u64 = 1_600_000_000;
    const REWARDS_IN_FIRST_ERA: u64 = FIRST_ERA_SECS / REWARD_INTERVAL_SECS;
    const REWARDS_PER_ERA: u64 = ERA_SECS / REWARD_INTERVAL_SECS;

    fn initial() -> U256 {
        U256::from(INITIAL_REWARD)
    }

    #[test]
    fn reward_halves_at_era_boundaries() {
        let s = EraSchedule::new(START);
        assert_eq!(s.reward_at(START), initial());
        assert_eq!(s.reward_at(START + FIRST_ERA_SECS - 1), initial());
        assert_eq!(s.reward_at(START + FIRST_ERA_SECS), initial() / 2u64);
        assert_eq!(s.reward_at(START + FIRST_ERA_SECS + ERA_SECS - 1), initial() / 2u64);
        assert_eq!(s.reward_at(START + FIRST_ERA_SECS + ERA_SECS), initial() / 4u64);
    }

    #[test]
    fn reward_reaches_zero_and_stays_there() {
        let s = EraSchedule::new(START);
        assert!(s.reward_at(START + 205 * SECONDS_PER_YEAR).is_zero());
        assert!(s.reward_at(u64::MAX).is_zero());
    }

    #[test]
    fn era_index() {
        let s = EraSchedule::new(START);
        assert_eq!(s.era_at(START), 0);
        assert_eq!(s.era_at(START - 10), 0);
        assert_eq!(s.era_at(START + FIRST_ERA_SECS - 1), 0);
        assert_eq!(s.era_at(START + FIRST_ERA_SECS), 1);
        assert_eq!(s.era_at(START + FIRST_ERA_SECS + ERA_SECS - 1), 1);
        assert_eq!(s.era_at(START + FIRST_ERA_SECS + ERA_SECS), 2);
    }

    #[test]
    fn era_start_tracks_boundaries() {
        let s = EraSchedule::new(START);
        assert_eq!(s.era_start(START + 5), START);
        assert_eq!(s.era_start(START + FIRST_ERA_SECS + 5), START + FIRST_ERA_SECS);
        assert_eq!(
            s.era_start(START + FIRST_ERA_SECS + ERA_SECS + 5),
            START + FIRST_ERA_SECS + ERA_SECS
        );
    }

    #[test]
    fn scheduled_count_within_first_era() {
        let s = EraSchedule::new(START);
        assert_eq!(s.scheduled_reward_count(START), 0);
        assert_eq!(s.scheduled_reward_count(START + 599), 0);
        assert_eq!(s.scheduled_reward_count(START + 600), 1);
        assert_eq!(s.scheduled_reward_count(START + 1199), 1);
        assert_eq!(s.scheduled_reward_count(START + 1200), 2);
        assert_eq!(
            s.scheduled_reward_count(START + FIRST_ERA_SECS - 1),
            REWARDS_IN_FIRST_ERA - 1
        );
    }

    #[test]
    fn scheduled_count_across_eras() {
        let s = EraSchedule::new(START);
        let first = START + FIRST_ERA_SECS;
        assert_eq!(s.scheduled_reward_count(first), REWARDS_IN_FIRST_ERA);
        assert_eq!(s.scheduled_reward_count(first + 1), REWARDS_IN_FIRST_ERA);
        assert_eq!(
            s.scheduled_reward_count(first + ERA_SECS),
            REWARDS_IN_FIRST_ERA + REWARDS_PER_ERA
        );
        assert_eq!(
            s.scheduled_reward_count(first + 2 * ERA_SECS - 1),
            REWARDS_IN_FIRST_ERA + 2 * REWARDS_PER_ERA - 1
        );
        assert_eq!(
            s.scheduled_reward_count(first + 2 * ERA_SECS),
            REWARDS_IN_FIRST_ERA + 2 * REWARDS_PER_ERA
        );
        assert_eq!(
            s.scheduled_reward_count(first + 60 * ERA_SECS + 1),
            REWARDS_IN_FIRST_ERA + 60 * REWARDS_PER_ERA
        );
    }

    proptest! {
        #[test]
        fn reward_is_non_increasing(
            a in 0u64..=300 * SECONDS_PER_YEAR,
            b in 0u64..=300 * SECONDS_PER_YEAR,
        ) {
            let s = EraSchedule::new(START);
            let (t1, t2) = (START + a.min(b), START + a.max(b));
            prop_assert!(s.reward_at(t2) <= s.reward_at(t1));
        }

        #[test]
        fn reward_is_a_halving_of_initial(t in 0u64..=300 * SECONDS_PER_YEAR) {
            let s = EraSchedule::new(START);
            let reward = s.reward_at(START + t);
            let era = s.era_at(START + t);
            if era >= 256 {
                prop_assert!(reward.is_zero());
            } else {
                prop_assert_eq!(reward, initial() >> (era as usize));
            }
        }
    }
}
