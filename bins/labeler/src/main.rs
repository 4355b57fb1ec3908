//! Postagram Label Attachment Service
//!
//! Receives object-created notifications, labels each uploaded image and
//! writes the labels onto the matching post record.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postagram_api::{EventState, create_event_router};
use postagram_core::events::LabelAttachmentHandler;
use postagram_core::labels::{LabelQuery, RekognitionDetector};
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

    // Label service
    let region = config
        .labels
        .region
        .clone()
        .unwrap_or_else(|| config.storage.region.clone());
    let detector = RekognitionDetector::from_env(Some(region)).await;
    let query = LabelQuery::from(&config.labels);
    info!(
        max_labels = query.max_labels,
        min_confidence = query.min_confidence,
        "Label detection configured"
    );

    let state = EventState {
        handler: Arc::new(LabelAttachmentHandler::new(
            Arc::new(detector),
            store,
            query,
        )),
    };

    // Create router
    let app = create_event_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Label service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
