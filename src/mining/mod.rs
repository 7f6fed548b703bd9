pub mod backlog;
pub mod difficulty;
pub mod pow;
pub mod schedule;
pub mod state;
pub mod types;

pub use pow::{PowHash, Sha256Pow};
pub use schedule::EraSchedule;
pub use state::{ClaimOutcome, MiningState};
pub use types::{Address, Challenge, ClaimRequest, Digest, Solution, U256};

/// Target mean time between paid rewards.
pub const REWARD_INTERVAL_SECS: u64 = 600;

/// Reward per interval during era 0, in base units (18 decimals).
pub const INITIAL_REWARD: u128 = 168 * 1_000_000_000_000_000_000;

/// Hardest allowed target: `2^16`.
pub const MINIMUM_TARGET: U256 = U256([1 << 16, 0, 0, 0]);

/// Easiest allowed target: `2^234`.
pub const MAXIMUM_TARGET: U256 = U256([0, 0, 0, 1 << 42]);

/// Hard ceiling on intervals paid by one claim; dominates the admin cap.
pub const MAX_REWARDS_AVAILABLE: u64 = 144;

/// Admin cap on a fresh deployment.
pub const DEFAULT_MAX_REWARDS: u64 = 1;
