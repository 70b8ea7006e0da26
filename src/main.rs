use std::io;

use actix_web::web;
use checkout_service::{build_server, create_pool, run_migrations, AppState, Config, TokenSettings};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    if config.jwt_secret.is_empty() {
        log::warn!("JWT_SECRET is not set; logins and authenticated routes will fail");
    }

    let pool = create_pool(&config.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let state = AppState::with_postgres(
        pool,
        TokenSettings {
            secret: config.jwt_secret.clone(),
            ttl: config.token_ttl,
        },
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(web::Data::new(state), &config.host, config.port)?.await
}
