use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::str::FromStr;

use taskvault::auth::TokenService;
use taskvault::config::Config;
use taskvault::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    // Production requires TLS toward the database; elsewhere it stays
    // opportunistic so local setups without certificates keep working.
    let connect_options = PgConnectOptions::from_str(&config.database_url)
        .expect("DATABASE_URL must be a valid Postgres URL")
        .ssl_mode(if config.is_production() {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        });
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to database");

    let tokens = web::Data::new(TokenService::new(&config.jwt_secret));
    let app_config = web::Data::new(config.clone());

    log::info!(
        "Starting TaskVault server at http://{}:{}",
        config.server_host,
        config.server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(tokens.clone())
            .app_data(app_config.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
