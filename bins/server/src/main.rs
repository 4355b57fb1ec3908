//! Postagram API Server
//!
//! Serves the Post API: create, list and delete posts, and issue upload URLs.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postagram_api::middleware::HeaderIdentity;
use postagram_api::{AppState, create_router};
use postagram_core::post::PostService;
use postagram_core::storage::{StorageConfig, StorageService};
use postagram_db::open_record_store;
use postagram_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postagram=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Record store
    let store = open_record_store(&config.record_store).await?;

    // Object storage
    let storage = StorageService::from_config(StorageConfig::from_settings(&config.storage)?)?;
    info!(
        provider = storage.provider_name(),
        location = %storage.location(),
        "Object storage configured"
    );

    // Create application state
    let state = AppState {
        posts: Arc::new(PostService::new(store, Arc::new(storage))),
        identity: Arc::new(HeaderIdentity::default()),
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
