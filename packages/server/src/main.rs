use std::sync::Arc;

use anyhow::Context;
use common::storage::FilesystemBlobStore;
use tracing::info;

use elearning_server::config::AppConfig;
use elearning_server::database::init_db;
use elearning_server::repository::SeaOrmCourseRepository;
use elearning_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    let blob_store = FilesystemBlobStore::new(config.storage.upload_dir.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload directory {}",
                config.storage.upload_dir.display()
            )
        })?;
    info!(upload_dir = %config.storage.upload_dir.display(), "Upload directory ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(
        config,
        Arc::new(SeaOrmCourseRepository::new(db)),
        Arc::new(blob_store),
    );
    let app = elearning_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
