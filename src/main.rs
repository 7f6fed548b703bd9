use std::io;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};

use spring_mint::api::{self, AppState};
use spring_mint::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("{e}");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    info!(
        "Starting mining API at http://{}:{} (owner={}, genesis={}, admin={})",
        config.host,
        config.port,
        config.owner,
        config.genesis_time,
        if config.admin_token.is_some() { "enabled" } else { "disabled" }
    );

    let state = web::Data::new(AppState::from_config(&config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
