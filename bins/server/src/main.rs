//! Atrium API Server
//!
//! Main entry point for the Atrium HR backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atrium_api::{AppState, create_router};
use atrium_core::storage::{StorageConfig, StorageProvider, StorageService};
use atrium_db::connect;
use atrium_shared::{AppConfig, JwtConfig, JwtService, config::StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atrium=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        #[allow(clippy::cast_possible_wrap)]
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
        #[allow(clippy::cast_possible_wrap)]
        refresh_token_expires_days: (config.jwt.refresh_token_expiry_secs / 86400) as i64,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Create payslip storage
    let storage = build_storage(&config.storage)?;
    info!(provider = storage.provider_name(), "Payslip storage configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        storage: Arc::new(storage),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_storage(settings: &StorageSettings) -> anyhow::Result<StorageService> {
    let provider = match settings.backend.as_str() {
        "s3" => StorageProvider::s3(
            settings
                .endpoint
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.endpoint is required for s3"))?,
            settings
                .bucket
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.bucket is required for s3"))?,
            settings
                .access_key_id
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.access_key_id is required for s3"))?,
            settings
                .secret_access_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.secret_access_key is required for s3"))?,
            settings
                .region
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.region is required for s3"))?,
        ),
        "fs" => StorageProvider::local_fs(&settings.root),
        other => anyhow::bail!("unknown storage backend '{other}', expected 'fs' or 's3'"),
    };

    Ok(StorageService::from_config(StorageConfig::new(provider))?)
}
