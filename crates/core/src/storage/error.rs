//! Storage error types.

use opendal::ErrorKind;
use thiserror::Error;

/// Object storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The provider cannot hand out signed links (local filesystem).
    #[error("storage provider cannot presign '{key}'")]
    PresignNotSupported {
        /// Object key the link was requested for.
        key: String,
    },

    /// Signing a read or upload link failed.
    #[error("failed to presign '{key}': {reason}")]
    Presign {
        /// Object key the link was requested for.
        key: String,
        /// Provider message.
        reason: String,
    },

    /// Removing an object failed.
    #[error("failed to delete '{key}': {reason}")]
    Delete {
        /// Object key that was not removed.
        key: String,
        /// Provider message.
        reason: String,
    },

    /// The provider could not be set up.
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Maps a failed presign of `key`.
    #[must_use]
    pub fn presign(key: &str, err: &opendal::Error) -> Self {
        match err.kind() {
            ErrorKind::Unsupported => Self::PresignNotSupported {
                key: key.to_string(),
            },
            _ => Self::Presign {
                key: key.to_string(),
                reason: err.to_string(),
            },
        }
    }

    /// Maps a failed delete of `key`.
    #[must_use]
    pub fn delete(key: &str, err: &opendal::Error) -> Self {
        Self::Delete {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }

    /// The object key involved, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::PresignNotSupported { key }
            | Self::Presign { key, .. }
            | Self::Delete { key, .. } => Some(key),
            Self::Configuration(_) => None,
        }
    }
}
