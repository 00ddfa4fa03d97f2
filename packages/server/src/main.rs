use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemAssetStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cms_server::config::AppConfig;
use cms_server::reconcile::{AssetReconciler, registry};
use cms_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = cms_server::database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;

    let assets = Arc::new(FilesystemAssetStore::new(
        config.storage.upload_dir.clone(),
        config.storage.max_upload_size,
    ));
    assets
        .clear_scratch()
        .await
        .context("Failed to clear upload scratch directory")?;
    let reconciler = Arc::new(AssetReconciler::new(db.clone(), assets.clone(), registry()));

    info!(
        upload_dir = %config.storage.upload_dir.display(),
        max_upload_size = config.storage.max_upload_size,
        "asset store ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        assets,
        reconciler,
    };
    let app = cms_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
