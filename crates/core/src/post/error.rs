//! Post error types.

use thiserror::Error;

use super::store::StoreError;
use crate::object_key::ObjectKeyError;
use crate::storage::StorageError;

/// Post operation errors.
#[derive(Debug, Error)]
pub enum PostError {
    /// Record store operation failed.
    #[error("record store error: {0}")]
    Store(#[from] StoreError),

    /// Object storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The identity or post id cannot form an image key.
    #[error("invalid image key: {0}")]
    InvalidKey(#[from] ObjectKeyError),
}
