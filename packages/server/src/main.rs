use std::sync::Arc;

use anyhow::Context;
use common::StorageBackend;
use common::storage::ObjectStore;
use common::storage::memory::MemoryObjectStore;
use common::storage::s3::S3ObjectStore;
use tracing::{error, info, warn};

use integrations_server::config::AppConfig;
use integrations_server::service::IntegrationService;
use integrations_server::state::AppState;
use integrations_server::store::SeaOrmIntegrationStore;
use integrations_server::{build_router, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log.max_level())
        .with_target(false)
        .init();

    let objects: Arc<dyn ObjectStore> = match config.storage.backend {
        StorageBackend::S3 => Arc::new(
            S3ObjectStore::new(&config.storage).context("Failed to configure object storage")?,
        ),
        StorageBackend::Memory => {
            warn!("Using in-memory object storage; uploads are lost on restart");
            Arc::new(MemoryObjectStore::new(config.storage.bucket.clone()))
        }
    };
    info!(bucket = %objects.bucket(), backend = ?config.storage.backend, "Object storage ready");

    let db = database::init_db(&config.database)
        .await
        .context("Failed to connect to metadata store")?;
    info!("Metadata store ready");

    let service = IntegrationService::new(
        objects,
        Arc::new(SeaOrmIntegrationStore::new(db.clone())),
        config.storage.max_upload_size,
    );
    let state = AppState::new(service).context("Failed to compile templates")?;
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Integrations page at http://{}/integrations", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await.context("Failed to close metadata store")?;
    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
