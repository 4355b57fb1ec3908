//! Event handling error types.

use thiserror::Error;

use crate::labels::LabelError;
use crate::object_key::ObjectKeyError;
use crate::post::StoreError;

/// Label attachment errors.
#[derive(Debug, Error)]
pub enum EventError {
    /// The object key does not name a post.
    #[error("malformed object key: {0}")]
    MalformedKey(#[from] ObjectKeyError),

    /// The label service failed.
    #[error("label detection failed: {0}")]
    Labels(#[from] LabelError),

    /// The record update failed.
    #[error("record update failed: {0}")]
    Store(#[from] StoreError),
}
