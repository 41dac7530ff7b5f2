use axum_helpers::server::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!(
        app_name = %config.docs.app_name,
        openapi = config.docs.add_openapi_views,
        swagger_ui = config.docs.swagger_ui,
        "Registering views"
    );

    let router = api::routes(config.docs.clone())?;

    // Merge health endpoints
    let app = router.merge(health_router(config.app));

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Docs API shutdown complete");
    Ok(())
}
