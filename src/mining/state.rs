use log::{debug, info};

use super::pow::{self, PowHash, Sha256Pow};
use super::schedule::EraSchedule;
use super::types::{Address, Challenge, ClaimRequest, Digest, U256};
use super::{backlog, difficulty, DEFAULT_MAX_REWARDS, MAX_REWARDS_AVAILABLE, MAXIMUM_TARGET};
use crate::error::{MintError, MintResult};
use crate::ledger::Ledger;

/// What an accepted claim produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub digest: Digest,
    /// Total minted to the solver.
    pub amount: U256,
    /// Reward intervals paid by this claim.
    pub rewards_given: u64,
    pub reward_per_interval: U256,
    /// Challenge the next claim must solve.
    pub challenge: Challenge,
    /// Target the next claim must meet.
    pub target: U256,
    /// 1-based sequence number of this claim.
    pub claim_number: u64,
    pub timestamp: u64,
}

/// Mutable mining record. Only an accepted claim or an owner write
/// changes it.
#[derive(Debug, Clone)]
pub struct MiningState<H = Sha256Pow> {
    hasher: H,
    owner: Address,
    schedule: EraSchedule,
    challenge: Challenge,
    target: U256,
    last_reward_time: u64,
    max_rewards: u64,
    tokens_minted: U256,
    claim_count: u64,
}

impl MiningState<Sha256Pow> {
    /// Fresh deployment at `creation_time`, hashing with SHA-256.
    pub fn new(owner: Address, creation_time: u64, challenge: Challenge) -> Self {
        Self::with_hasher(Sha256Pow, owner, creation_time, challenge)
    }
}

impl<H: PowHash> MiningState<H> {
    pub fn with_hasher(hasher: H, owner: Address, creation_time: u64, challenge: Challenge) -> Self {
        Self {
            hasher,
            owner,
            schedule: EraSchedule::new(creation_time),
            challenge,
            target: MAXIMUM_TARGET,
            last_reward_time: creation_time,
            max_rewards: DEFAULT_MAX_REWARDS,
            tokens_minted: U256::zero(),
            claim_count: 0,
        }
    }

    /// Start from `target` instead of `MAXIMUM_TARGET`, clamped into bounds.
    pub fn with_initial_target(mut self, target: U256) -> Self {
        self.target = difficulty::clamp_target(target);
        self
    }

    /// Validate a solution and, if it holds, pay the solver and advance.
    ///
    /// `now` comes from the caller's platform. Everything is computed
    /// before the ledger is touched and committed only after it accepts,
    /// so any error leaves both sides unchanged.
    pub fn claim<L: Ledger>(
        &mut self,
        ledger: &mut L,
        request: &ClaimRequest,
        now: u64,
    ) -> MintResult<ClaimOutcome> {
        let now = now.max(self.last_reward_time);

        let reward_per_interval = self.schedule.reward_at(now);
        if reward_per_interval.is_zero() {
            return Err(MintError::RewardExhausted);
        }

        let digest = pow::validate(&self.hasher, &self.challenge, self.target, request)?;

        // Any valid proof collects the whole available backlog.
        let rewards_given =
            backlog::rewards_to_give(u64::MAX, self.last_reward_time, self.max_rewards, now);
        let amount = reward_per_interval
            .checked_mul(U256::from(rewards_given))
            .ok_or(MintError::Overflow)?;
        let tokens_minted = self
            .tokens_minted
            .checked_add(amount)
            .ok_or(MintError::Overflow)?;
        let claim_number = self.claim_count.checked_add(1).ok_or(MintError::Overflow)?;

        let next_challenge = pow::next_challenge(&self.challenge, &digest);
        let next_target =
            difficulty::adjust_difficulty(self.target, self.last_reward_time, rewards_given, now);
        debug!(
            "claim #{} elapsed={}s given={}",
            claim_number,
            now - self.last_reward_time,
            rewards_given
        );

        let solver = request.solution().solver;
        ledger.mint(amount, &solver)?;

        self.last_reward_time = now;
        self.tokens_minted = tokens_minted;
        self.claim_count = claim_number;
        self.challenge = next_challenge;
        self.target = next_target;

        info!(
            "claim #{} accepted: solver={} amount={} rewards={} digest={}",
            claim_number, solver, amount, rewards_given, digest
        );

        Ok(ClaimOutcome {
            digest,
            amount,
            rewards_given,
            reward_per_interval,
            challenge: next_challenge,
            target: next_target,
            claim_number,
            timestamp: now,
        })
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn target(&self) -> U256 {
        self.target
    }

    pub fn difficulty(&self) -> U256 {
        difficulty::mining_difficulty(self.target)
    }

    pub fn creation_time(&self) -> u64 {
        self.schedule.genesis()
    }

    pub fn last_reward_time(&self) -> u64 {
        self.last_reward_time
    }

    pub fn max_rewards(&self) -> u64 {
        self.max_rewards
    }

    pub fn tokens_minted(&self) -> U256 {
        self.tokens_minted
    }

    pub fn claim_count(&self) -> u64 {
        self.claim_count
    }

    pub fn reward_era(&self, t: u64) -> u64 {
        self.schedule.era_at(t)
    }

    pub fn reward_at(&self, t: u64) -> U256 {
        self.schedule.reward_at(t)
    }

    pub fn scheduled_reward_count(&self, t: u64) -> u64 {
        self.schedule.scheduled_reward_count(t)
    }

    /// Intervals a claim landing at `t` could collect.
    pub fn rewards_available(&self, t: u64) -> u64 {
        backlog::rewards_available(self.last_reward_time, self.max_rewards, t)
    }

    pub fn adjustment_interval(&self) -> u64 {
        backlog::adjustment_interval(self.max_rewards)
    }

    /// Payout a proof reaching `achieved` would earn if claimed at `t`.
    pub fn reward_for_achieving_target(&self, achieved: U256, t: u64) -> MintResult<U256> {
        let earned = backlog::rewards_earned(self.target, achieved);
        let given = backlog::rewards_to_give(earned, self.last_reward_time, self.max_rewards, t);
        self.schedule
            .reward_at(t)
            .checked_mul(U256::from(given))
            .ok_or(MintError::Overflow)
    }

    /// Change the claim window cap, clamped to `[1, MAX_REWARDS_AVAILABLE]`.
    /// Applies to later claims only.
    pub fn set_max_rewards(&mut self, caller: &Address, max_rewards: u64) -> MintResult<u64> {
        self.authorize(caller)?;
        self.max_rewards = max_rewards.clamp(1, MAX_REWARDS_AVAILABLE);
        info!("max rewards per claim set to {}", self.max_rewards);
        Ok(self.max_rewards)
    }

    /// Re-seed the challenge.
    pub fn set_challenge(&mut self, caller: &Address, challenge: Challenge) -> MintResult<()> {
        self.authorize(caller)?;
        self.challenge = challenge;
        info!("challenge re-seeded to {}", challenge);
        Ok(())
    }

    /// Overwrite the target, clamped into the global bounds.
    pub fn set_target(&mut self, caller: &Address, target: U256) -> MintResult<U256> {
        self.authorize(caller)?;
        self.target = difficulty::clamp_target(target);
        info!("mining target set to {:#x}", self.target);
        Ok(self.target)
    }

    fn authorize(&self, caller: &Address) -> MintResult<()> {
        if *caller != self.owner {
            return Err(MintError::Unauthorized(*caller));
        }
        Ok(())
    }
}
