use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

/// Liveness plus a cheap read proving the mining lock is reachable.
#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let claim_count = state.mining.lock().expect("mutex poisoned").claim_count();
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        claim_count,
    })
}
