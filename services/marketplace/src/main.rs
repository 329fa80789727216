use sea_orm::Database;
use tracing::info;

use ucademic_auth_types::identity::JwtSecret;
use ucademic_core::config::Config;
use ucademic_core::tracing::init_tracing;

use ucademic_marketplace::config::MarketplaceConfig;
use ucademic_marketplace::router::{build_router, cors_layer};
use ucademic_marketplace::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = MarketplaceConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let cors = cors_layer(&config.cors_allowed_origin).expect("invalid CORS_ALLOWED_ORIGIN");
    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        access_token_ttl_seconds: config.access_token_ttl_seconds(),
    };

    let router = build_router(state, cors);
    let addr = format!("0.0.0.0:{}", config.marketplace_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("marketplace service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
