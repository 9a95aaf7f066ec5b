use axum_helpers::server::{ShutdownCoordinator, create_production_app, health_router};
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod scheduler;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors are colored too
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        Some(RetryConfig::from_env()?),
    )
    .await
    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    let state = AppState::new(config, db);

    if state.config.archive.on_startup {
        info!("Archiving stale events before serving");
        scheduler::run_archive(&state.events).await;
    }

    let mut archive_scheduler =
        scheduler::start(state.events.clone(), &state.config.archive).await?;

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // /health: liveness with app name/version
    // /ready: database round-trip
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    let (coordinator, _) = ShutdownCoordinator::new();
    let server = state.config.server.clone();
    let db = state.db.clone();

    info!("Starting arena API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &server,
        coordinator,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: stopping scheduler and closing database connections");

            if let Err(e) = archive_scheduler.shutdown().await {
                error!("Error stopping archival scheduler: {}", e);
            }

            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Arena API shutdown complete");
    Ok(())
}
