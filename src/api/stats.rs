use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};
use super::unix_now;
use crate::ledger::{TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};
use crate::mining::{MAX_REWARDS_AVAILABLE, REWARD_INTERVAL_SECS};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let now = unix_now();
    let mining = state.mining.lock().expect("mutex poisoned");
    let ledger = state.ledger.lock().expect("mutex poisoned");

    HttpResponse::Ok().json(StatsResponse {
        name: TOKEN_NAME,
        symbol: TOKEN_SYMBOL,
        decimals: TOKEN_DECIMALS,
        total_supply: ledger.total_supply().to_string(),
        holders: ledger.len(),
        tokens_minted: mining.tokens_minted().to_string(),
        claim_count: mining.claim_count(),
        challenge: mining.challenge().to_string(),
        target: mining.target().to_string(),
        difficulty: mining.difficulty().to_string(),
        max_rewards: mining.max_rewards(),
        max_rewards_available: MAX_REWARDS_AVAILABLE,
        reward_interval_secs: REWARD_INTERVAL_SECS,
        adjustment_interval_secs: mining.adjustment_interval(),
        creation_time: mining.creation_time(),
        last_reward_time: mining.last_reward_time(),
        now,
        era: mining.reward_era(now),
        reward: mining.reward_at(now).to_string(),
        scheduled_reward_count: mining.scheduled_reward_count(now),
        rewards_available: mining.rewards_available(now),
    })
}
