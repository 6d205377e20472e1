use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use omi_backend::config::{GameConfig, ServerConfig};
use omi_backend::middleware::cors::cors_middleware;
use omi_backend::services::cleanup;
use omi_backend::state::app_state::AppState;
use omi_backend::{routes, telemetry};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: set via docker-compose env_file or docker run --env-file
    // - Local dev: source env files manually (e.g., set -a; . ./.env; set +a)
    let server_config = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };
    let game_config = GameConfig::from_env();
    let shutdown_grace = game_config.shutdown_grace;

    info!(
        host = %server_config.host,
        port = server_config.port,
        max_rooms = game_config.max_rooms,
        target_score = game_config.target_score,
        "starting omi-backend"
    );

    let state = Arc::new(AppState::new(game_config, server_config.admin_token.clone()));
    cleanup::spawn_sweeps(Arc::clone(&state));

    let data = web::Data::from(Arc::clone(&state));
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .disable_signals()
    .run();

    // Graceful shutdown: notify every connected seat, wait out the grace
    // period, then stop unconditionally whether or not delivery finished.
    let handle = server.handle();
    let shutdown_state = Arc::clone(&state);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        info!("shutdown signal received, notifying rooms");
        let out = cleanup::shutdown_notices(&shutdown_state);
        shutdown_state.hub.deliver_all(out);
        tokio::time::sleep(shutdown_grace).await;
        handle.stop(false).await;
    });

    server.await
}
