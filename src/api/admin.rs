use actix_web::{HttpRequest, HttpResponse, Responder, post, web};

use super::models::{
    AppState, ChallengeResponse, MaxRewardsResponse, SetChallengeRequest, SetMaxRewardsRequest,
    SetTargetRequest, TargetResponse,
};
use super::{admin_caller, bad_request, reject};
use crate::mining::{Challenge, U256};

/// Update the per-claim cap (affects later claims only).
#[post("/admin/max-rewards/")]
pub async fn set_max_rewards(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SetMaxRewardsRequest>,
) -> impl Responder {
    let caller = admin_caller(&req, &state);
    let mut mining = state.mining.lock().expect("mutex poisoned");
    match mining.set_max_rewards(&caller, body.max_rewards) {
        Ok(max_rewards) => HttpResponse::Ok().json(MaxRewardsResponse {
            max_rewards,
            adjustment_interval_secs: mining.adjustment_interval(),
        }),
        Err(e) => reject(&e),
    }
}

#[post("/admin/challenge/")]
pub async fn set_challenge(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SetChallengeRequest>,
) -> impl Responder {
    let caller = admin_caller(&req, &state);
    let challenge: Challenge = match body.challenge.parse() {
        Ok(c) => c,
        Err(e) => return bad_request(format!("challenge: {e}")),
    };
    let mut mining = state.mining.lock().expect("mutex poisoned");
    match mining.set_challenge(&caller, challenge) {
        Ok(()) => HttpResponse::Ok().json(ChallengeResponse {
            challenge: mining.challenge().to_string(),
        }),
        Err(e) => reject(&e),
    }
}

/// Overwrite the mining target; out-of-range values are clamped.
#[post("/admin/target/")]
pub async fn set_target(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SetTargetRequest>,
) -> impl Responder {
    let caller = admin_caller(&req, &state);
    let Some(target) = U256::parse(&body.target) else {
        return bad_request("target: expected decimal or 0x hex");
    };
    let mut mining = state.mining.lock().expect("mutex poisoned");
    match mining.set_target(&caller, target) {
        Ok(target) => HttpResponse::Ok().json(TargetResponse {
            target: target.to_string(),
            difficulty: mining.difficulty().to_string(),
            adjustment_interval_secs: mining.adjustment_interval(),
        }),
        Err(e) => reject(&e),
    }
}
