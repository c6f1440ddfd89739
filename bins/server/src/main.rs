//! Talentscan API Server
//!
//! Main entry point for the career-portal backend.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talentscan_api::{AppState, create_router};
use talentscan_core::history::HistoryService;
use talentscan_core::profile::ProfileService;
use talentscan_core::storage::{StorageConfig, StorageService};
use talentscan_core::upload::{UploadPolicy, UploadService};
use talentscan_db::{ActivityRepository, StudentRepository, UploadSlotRepository, connect_with};
use talentscan_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talentscan=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.session.secret.clone(),
        session_expires_secs: i64::try_from(config.session.token_expiry_secs).unwrap_or(i64::MAX),
    });

    let storage = StorageService::from_config(StorageConfig::from_settings(&config.storage)?)?;
    info!(
        provider = storage.provider_name(),
        bucket = %config.storage.bucket,
        "Storage configured"
    );

    let students = Arc::new(StudentRepository::new(db.clone()));
    let uploads = Arc::new(UploadService::new(
        Arc::new(storage),
        Arc::new(UploadSlotRepository::new(db.clone())),
        students.clone(),
        UploadPolicy::from_settings(&config.storage),
    ));

    if config.storage.sweep_interval_secs > 0 {
        spawn_sweeper(
            uploads.clone(),
            Duration::from_secs(config.storage.sweep_interval_secs),
            config.storage.sweep_batch_size,
        );
    }

    let state = AppState {
        jwt_service: Arc::new(jwt_service),
        cookie_name: Arc::from(config.session.cookie_name.as_str()),
        uploads,
        profiles: Arc::new(ProfileService::new(students)),
        history: Arc::new(HistoryService::new(
            Arc::new(ActivityRepository::new(db)),
            config.history.recent_limit,
        )),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically removes expired pending upload slots and their objects.
fn spawn_sweeper(uploads: Arc<UploadService>, every: Duration, batch: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            if let Err(e) = uploads.sweep_expired(chrono::Utc::now(), batch).await {
                error!(error = %e, "Upload slot sweep failed");
            }
        }
    });
}
