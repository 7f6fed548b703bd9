use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};
use rand::Rng;

use super::models::{
    AppState, ChallengeResponse, ClaimRequestBody, ClaimResponse, MineRequest, MineResponse,
    RewardQuery, RewardResponse, TargetResponse,
};
use super::{bad_request, reject, unix_now};
use crate::mining::{Address, ClaimRequest, Digest, U256, pow};

const DEFAULT_MINE_ATTEMPTS: u64 = 5_000_000;
const MAX_MINE_ATTEMPTS: u64 = 50_000_000;

fn parse_solver(raw: &str) -> Result<Address, HttpResponse> {
    raw.parse()
        .map_err(|e| bad_request(format!("solver: {e}")))
}

/// Apply one claim under both locks, mining first.
fn apply_claim(state: &AppState, request: &ClaimRequest) -> HttpResponse {
    let mut mining = state.mining.lock().expect("mutex poisoned");
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match mining.claim(&mut *ledger, request, unix_now()) {
        Ok(outcome) => HttpResponse::Ok().json(ClaimResponse::from(&outcome)),
        Err(e) => {
            warn!("claim from {} rejected: {e}", request.solution().solver);
            reject(&e)
        }
    }
}

/// Submit a solution. A `digest` field selects the legacy entry point.
#[post("/mining/claim/")]
pub async fn claim(
    state: web::Data<AppState>,
    body: web::Json<ClaimRequestBody>,
) -> impl Responder {
    let Some(nonce) = U256::parse(&body.nonce) else {
        return bad_request("nonce: expected decimal or 0x hex");
    };
    let solver = match parse_solver(&body.solver) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    let request = match body.digest.as_deref() {
        None => ClaimRequest::direct(nonce, solver),
        Some(raw) => match raw.parse::<Digest>() {
            Ok(digest) => ClaimRequest::legacy(nonce, solver, digest),
            Err(e) => return bad_request(format!("digest: {e}")),
        },
    };
    apply_claim(&state, &request)
}

/// Development miner: search from a random nonce against the live
/// challenge and target, then claim what it finds.
#[post("/mining/mine/")]
pub async fn mine(state: web::Data<AppState>, req: web::Json<MineRequest>) -> impl Responder {
    let solver = match parse_solver(&req.solver) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    let attempts = req
        .max_attempts
        .unwrap_or(DEFAULT_MINE_ATTEMPTS)
        .min(MAX_MINE_ATTEMPTS);

    // Snapshot; release the lock before hashing.
    let (hasher, challenge, target) = {
        let mining = state.mining.lock().expect("mutex poisoned");
        (*mining.hasher(), *mining.challenge(), mining.target())
    };

    let mut seed = [0u8; 32];
    rand::thread_rng().fill(&mut seed);
    let start = U256::from_big_endian(&seed);
    debug!("MINER - searching {attempts} nonces for {solver} from {start:#x}");

    let Some((nonce, digest)) = pow::solve(&hasher, &challenge, &solver, target, start, attempts)
    else {
        return HttpResponse::BadRequest().json(super::models::ErrorResponse {
            error: "search_exhausted".to_string(),
            message: format!("no solution within {attempts} attempts"),
        });
    };
    info!("MINER - found nonce {nonce:#x} (digest={digest})");

    // The challenge may have rotated meanwhile; the claim then fails normally.
    let request = ClaimRequest::direct(nonce, solver);
    let mut mining = state.mining.lock().expect("mutex poisoned");
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match mining.claim(&mut *ledger, &request, unix_now()) {
        Ok(outcome) => HttpResponse::Ok().json(MineResponse {
            nonce: nonce.to_string(),
            claim: ClaimResponse::from(&outcome),
        }),
        Err(e) => {
            warn!("MINER - claim for {solver} rejected: {e}");
            reject(&e)
        }
    }
}

#[get("/mining/challenge/")]
pub async fn get_challenge(state: web::Data<AppState>) -> impl Responder {
    let mining = state.mining.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChallengeResponse {
        challenge: mining.challenge().to_string(),
    })
}

#[get("/mining/target/")]
pub async fn get_target(state: web::Data<AppState>) -> impl Responder {
    let mining = state.mining.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(TargetResponse {
        target: mining.target().to_string(),
        difficulty: mining.difficulty().to_string(),
        adjustment_interval_secs: mining.adjustment_interval(),
    })
}

/// Schedule and backlog at `?at=` (defaults to now).
#[get("/mining/reward/")]
pub async fn get_reward(
    state: web::Data<AppState>,
    query: web::Query<RewardQuery>,
) -> impl Responder {
    let at = query.at.unwrap_or_else(unix_now);
    let mining = state.mining.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(RewardResponse {
        at,
        era: mining.reward_era(at),
        reward: mining.reward_at(at).to_string(),
        scheduled_reward_count: mining.scheduled_reward_count(at),
        rewards_available: mining.rewards_available(at),
    })
}
