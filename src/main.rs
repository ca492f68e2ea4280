use dotenvy::dotenv;
use seed_atlas::{
    api::{AppState, router},
    config::{self, achievements::Config as CatalogConfig, server::ServerSettings},
    core::achievement::seed_catalog,
    errors::Result,
};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Server settings
    let settings = ServerSettings::from_env()
        .inspect_err(|e| error!("Invalid server settings: {}", e))?;

    // 4. Initialize database and schema
    let db = config::database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the achievement catalog
    let catalog = if Path::new(&settings.config_path).exists() {
        config::achievements::load_config(&settings.config_path)?
    } else {
        warn!(
            "Catalog file '{}' not found. Starting with an empty achievement catalog.",
            settings.config_path
        );
        CatalogConfig::default()
    };
    seed_catalog(&db, &catalog.achievements)
        .await
        .inspect_err(|e| error!("Failed to seed achievement catalog: {}", e))?;

    // 6. Serve
    let listener = tokio::net::TcpListener::bind(settings.bind_address).await?;
    info!("Listening on {}", settings.bind_address);
    axum::serve(listener, router(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
