mod admin;
mod balance;
mod health;
mod mining;
pub mod models;
mod stats;

use actix_web::web::{self, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse, http::header};

use crate::error::MintError;
use crate::mining::Address;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(mining::claim)
            .service(mining::mine)
            .service(mining::get_challenge)
            .service(mining::get_target)
            .service(mining::get_reward)
            .service(stats::get_stats)
            .service(admin::set_max_rewards)
            .service(admin::set_challenge)
            .service(admin::set_target)
            .service(balance::get_balance),
    );
}

/// Unix seconds from the platform clock.
pub(crate) fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// 403 for authorization failures, 400 for every other refusal.
pub(crate) fn reject(err: &MintError) -> HttpResponse {
    let body = models::ErrorResponse {
        error: err.kind().to_string(),
        message: err.to_string(),
    };
    match err {
        MintError::Unauthorized(_) => HttpResponse::Forbidden().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Malformed request input.
pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(models::ErrorResponse {
        error: "bad_request".to_string(),
        message: message.into(),
    })
}

/// Identity behind an admin call: the owner when the bearer token matches,
/// otherwise the zero address, which the mining state refuses.
pub(crate) fn admin_caller(req: &HttpRequest, state: &AppState) -> Address {
    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    match (state.admin_token.as_deref(), presented) {
        (Some(expected), Some(given)) if expected == given => state.owner,
        _ => Address::ZERO,
    }
}
