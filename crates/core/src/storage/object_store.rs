//! The object store seam.

use async_trait::async_trait;

use super::error::StorageError;
use super::service::PresignedUrl;

/// Blob storage holding uploaded images.
///
/// [`StorageService`](super::StorageService) is the production
/// implementation; tests substitute their own.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Time-limited link for reading `key`.
    async fn presign_read(&self, key: &str) -> Result<PresignedUrl, StorageError>;

    /// Time-limited credential for uploading to `key`.
    async fn presign_write(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, StorageError>;

    /// Removes `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
