//! The record store seam.

use async_trait::async_trait;
use thiserror::Error;

use super::keys::PostKey;
use super::types::PostRecord;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the operation.
    #[error("record store operation failed: {0}")]
    Operation(String),

    /// A stored item could not be decoded.
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Create a malformed record error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Key-value store holding post records.
///
/// Implemented by the db crate for Postgres and by [`MemoryRecordStore`]
/// for development and tests.
///
/// [`MemoryRecordStore`]: super::MemoryRecordStore
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes a record, replacing any record with the same key.
    async fn put(&self, record: PostRecord) -> Result<(), StoreError>;

    /// Reads one record.
    async fn get(&self, key: &PostKey) -> Result<Option<PostRecord>, StoreError>;

    /// Reads every record in one partition.
    async fn query(&self, partition_key: &str) -> Result<Vec<PostRecord>, StoreError>;

    /// Reads every record in the store.
    async fn scan(&self) -> Result<Vec<PostRecord>, StoreError>;

    /// Removes one record. Removing a missing record is not an error.
    async fn delete(&self, key: &PostKey) -> Result<(), StoreError>;

    /// Sets `image` and `label` on a record, creating a record holding only
    /// those attributes when none exists. Other attributes are kept.
    async fn set_image_labels(
        &self,
        key: &PostKey,
        image: &str,
        labels: &[String],
    ) -> Result<(), StoreError>;
}
