use actix_web::{HttpResponse, Responder, get, web};

use super::bad_request;
use super::models::{AppState, BalanceResponse};
use crate::mining::Address;

#[get("/balance/{address}/")]
pub async fn get_balance(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let raw = path.into_inner().0;
    let address: Address = match raw.parse() {
        Ok(a) => a,
        Err(e) => return bad_request(format!("address: {e}")),
    };

    let balance = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.balance_of(&address)
    };

    HttpResponse::Ok().json(BalanceResponse {
        address: address.to_string(),
        balance: balance.to_string(),
    })
}
