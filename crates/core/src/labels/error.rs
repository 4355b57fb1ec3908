//! Label detection error types.

use thiserror::Error;

/// Label detection errors.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The labeling service rejected or failed the request.
    #[error("label service error: {0}")]
    Service(String),
}

impl LabelError {
    /// Create a service error.
    #[must_use]
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }
}
