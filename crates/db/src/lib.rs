//! PostgreSQL record store for posts.
//!
//! This crate provides:
//! - Connection setup
//! - The posts table definition and its idempotent creation
//! - `PostRepository`, the Postgres implementation of `RecordStore`

pub mod repositories;
pub mod schema;

pub use repositories::PostRepository;
pub use schema::{TableNameError, ensure_posts_table};

use std::sync::Arc;

use postagram_core::post::{MemoryRecordStore, RecordStore};
use postagram_shared::{RecordStoreBackend, RecordStoreConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.max_connections(max_connections).sqlx_logging(false);
    Database::connect(options).await
}

/// Opens the record store selected by configuration.
///
/// # Errors
///
/// Returns an error if the Postgres backend has no URL, cannot connect, or
/// the table name is unusable.
pub async fn open_record_store(
    config: &RecordStoreConfig,
) -> Result<Arc<dyn RecordStore>, DbErr> {
    match config.backend {
        RecordStoreBackend::Memory => {
            warn!("Using in-memory record store; posts are lost on restart");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        RecordStoreBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                DbErr::Custom("record_store.database_url is not set".to_string())
            })?;
            let db = connect(url, config.max_connections).await?;
            info!(table = %config.table, "Connected to record store");

            let repository = PostRepository::new(db, &config.table)
                .map_err(|e| DbErr::Custom(e.to_string()))?;
            Ok(Arc::new(repository))
        }
    }
}
