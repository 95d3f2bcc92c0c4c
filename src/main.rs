use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use practice_info_api::auth::JwtKeys;
use practice_info_api::config::{self, StorageBackend};
use practice_info_api::database::{
    ClinicianResolver, DatabaseManager, MemoryClinicianDirectory, MemoryPracticeStore, PgClinicianResolver,
    PgPracticeStore, PracticeStore,
};
use practice_info_api::is_production;
use practice_info_api::services::{PracticeService, UploadService};
use practice_info_api::storage::LocalBlobStore;
use practice_info_api::AppState;

#[derive(Parser)]
#[command(name = "practice-info-api")]
#[command(about = "Back-office API for clinician practice information")]
#[command(version)]
struct Args {
    #[arg(long, env = "PRACTICE_API_PORT", help = "Port to listen on (overrides config)")]
    port: Option<u16>,

    #[arg(long, help = "Use in-memory stores instead of Postgres")]
    memory: bool,

    #[arg(long, help = "Create the practice_information table before serving")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting Practice Information API in {:?} mode", config.environment);

    let jwt = JwtKeys::from_secret(&config.security.jwt_secret).context("JWT_SECRET must be set")?;

    let use_memory = args.memory || config.storage.backend == StorageBackend::Memory || {
        // Outside production, a missing DATABASE_URL falls back to memory
        config.database.url.is_none() && !is_production!()
    };

    let (store, clinicians): (Arc<dyn PracticeStore>, Arc<dyn ClinicianResolver>) = if use_memory {
        tracing::warn!("Using in-memory stores; data is lost on restart");
        let directory = MemoryClinicianDirectory::from_entries(&config.storage.memory_clinicians)
            .context("invalid STORAGE_MEMORY_CLINICIANS")?;
        if directory.is_empty().await {
            tracing::warn!("No clinicians configured; set STORAGE_MEMORY_CLINICIANS=user_id:clinician_id");
        }
        (Arc::new(MemoryPracticeStore::new()), Arc::new(directory))
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        if args.migrate {
            DatabaseManager::ensure_schema(&pool).await?;
        }
        (
            Arc::new(PgPracticeStore::new(pool.clone())),
            Arc::new(PgClinicianResolver::new(pool)),
        )
    };

    let blobs = LocalBlobStore::new(&config.storage.blob_root, &config.storage.public_base_url)?;
    blobs.ensure_container(&config.storage.upload_container).await?;

    let state = AppState::new(
        jwt,
        PracticeService::new(store, clinicians),
        UploadService::new(
            Arc::new(blobs),
            config.storage.upload_container.clone(),
            config.storage.max_upload_bytes,
        ),
    );

    let mut app = practice_info_api::app(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(practice_info_api::cors_layer(&config.security));
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Practice Information API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
