use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::config::AppConfig;
use crate::ledger::Balances;
use crate::mining::{Address, ClaimOutcome, MiningState};

/// Shared application state: the mining record and the balance book it
/// mints into. Lock `mining` before `ledger`.
pub struct AppState {
    pub mining: Mutex<MiningState>,
    pub ledger: Mutex<Balances>,
    pub owner: Address,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let mining = MiningState::new(config.owner, config.genesis_time, config.initial_challenge)
            .with_initial_target(config.mining_target);
        Self {
            mining: Mutex::new(mining),
            ledger: Mutex::new(Balances::new(config.contract)),
            owner: config.owner,
            admin_token: config.admin_token.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub claim_count: u64,
}

/* ---------- Error body ---------- */

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/* ---------- Mining API Models ---------- */

// 256-bit values travel as strings: decimal or 0x hex in, decimal out.

#[derive(Deserialize)]
pub struct ClaimRequestBody {
    pub nonce: String,
    pub solver: String,
    /// Present only for legacy clients that assert the digest.
    pub digest: Option<String>,
}

#[derive(Serialize)]
pub struct ClaimResponse {
    pub claim_number: u64,
    pub digest: String,
    pub amount: String,
    pub rewards_given: u64,
    pub reward_per_interval: String,
    pub next_challenge: String,
    pub next_target: String,
    pub timestamp: u64,
}

impl From<&ClaimOutcome> for ClaimResponse {
    fn from(out: &ClaimOutcome) -> Self {
        Self {
            claim_number: out.claim_number,
            digest: out.digest.to_string(),
            amount: out.amount.to_string(),
            rewards_given: out.rewards_given,
            reward_per_interval: out.reward_per_interval.to_string(),
            next_challenge: out.challenge.to_string(),
            next_target: out.target.to_string(),
            timestamp: out.timestamp,
        }
    }
}

#[derive(Deserialize)]
pub struct MineRequest {
    pub solver: String,
    pub max_attempts: Option<u64>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub nonce: String,
    #[serde(flatten)]
    pub claim: ClaimResponse,
}

#[derive(Serialize)]
pub struct ChallengeResponse {
    pub challenge: String,
}

#[derive(Serialize)]
pub struct TargetResponse {
    pub target: String,
    pub difficulty: String,
    pub adjustment_interval_secs: u64,
}

#[derive(Deserialize)]
pub struct RewardQuery {
    pub at: Option<u64>,
}

#[derive(Serialize)]
pub struct RewardResponse {
    pub at: u64,
    pub era: u64,
    pub reward: String,
    pub scheduled_reward_count: u64,
    pub rewards_available: u64,
}

/* ---------- Admin API Models ---------- */

#[derive(Deserialize)]
pub struct SetMaxRewardsRequest {
    pub max_rewards: u64,
}

#[derive(Serialize)]
pub struct MaxRewardsResponse {
    pub max_rewards: u64,
    pub adjustment_interval_secs: u64,
}

#[derive(Deserialize)]
pub struct SetChallengeRequest {
    pub challenge: String,
}

#[derive(Deserialize)]
pub struct SetTargetRequest {
    pub target: String,
}

/* ---------- Ledger / Stats Models ---------- */

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
    pub total_supply: String,
    pub holders: usize,
    pub tokens_minted: String,
    pub claim_count: u64,
    pub challenge: String,
    pub target: String,
    pub difficulty: String,
    pub max_rewards: u64,
    pub max_rewards_available: u64,
    pub reward_interval_secs: u64,
    pub adjustment_interval_secs: u64,
    pub creation_time: u64,
    pub last_reward_time: u64,
    pub now: u64,
    pub era: u64,
    pub reward: String,
    pub scheduled_reward_count: u64,
    pub rewards_available: u64,
}
