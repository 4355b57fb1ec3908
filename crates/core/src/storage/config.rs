//! Storage configuration types.

use std::path::PathBuf;

use postagram_shared::{ObjectStorageConfig, ObjectStorageProvider};
use serde::{Deserialize, Serialize};

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: AWS S3, MinIO, Cloudflare R2
    S3 {
        /// Custom endpoint URL; the AWS endpoint for `region` when unset.
        endpoint: Option<String>,
        /// S3 bucket name.
        bucket: String,
        /// AWS region.
        region: String,
        /// Access key ID; the default credential chain when unset.
        access_key_id: Option<String>,
        /// Secret access key.
        secret_access_key: Option<String>,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create an S3 provider using the default credential chain.
    #[must_use]
    pub fn s3(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self::S3 {
            endpoint: None,
            bucket: bucket.into(),
            region: region.into(),
            access_key_id: None,
            secret_access_key: None,
        }
    }

    /// Create an S3-compatible provider with a custom endpoint and static keys.
    #[must_use]
    pub fn s3_compatible(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: Some(endpoint.into()),
            bucket: bucket.into(),
            region: region.into(),
            access_key_id: Some(access_key_id.into()),
            secret_access_key: Some(secret_access_key.into()),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }

    /// Where objects live: the S3 bucket name, or the root directory of the
    /// local provider.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Presigned upload URL TTL in seconds (default: 900 = 15 minutes).
    pub presign_upload_ttl_secs: u64,
    /// Presigned download URL TTL in seconds (default: 3600 = 1 hour).
    pub presign_download_ttl_secs: u64,
}

impl StorageConfig {
    /// Default upload TTL: 15 minutes.
    pub const DEFAULT_UPLOAD_TTL: u64 = 900;
    /// Default download TTL: 1 hour.
    pub const DEFAULT_DOWNLOAD_TTL: u64 = 3600;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            presign_upload_ttl_secs: Self::DEFAULT_UPLOAD_TTL,
            presign_download_ttl_secs: Self::DEFAULT_DOWNLOAD_TTL,
        }
    }

    /// Build from the application's object storage section.
    ///
    /// # Errors
    ///
    /// Returns an error if the local provider has no root directory.
    pub fn from_settings(settings: &ObjectStorageConfig) -> Result<Self, StorageError> {
        let provider = match settings.provider {
            ObjectStorageProvider::S3 => StorageProvider::S3 {
                endpoint: settings.endpoint.clone(),
                bucket: settings.bucket.clone(),
                region: settings.region.clone(),
                access_key_id: settings.access_key_id.clone(),
                secret_access_key: settings.secret_access_key.clone(),
            },
            ObjectStorageProvider::Local => {
                let root = settings
                    .root
                    .as_deref()
                    .ok_or_else(|| StorageError::configuration("local provider needs a root"))?;
                StorageProvider::local_fs(root)
            }
        };

        Ok(Self::new(provider)
            .with_upload_ttl(settings.upload_ttl_secs)
            .with_download_ttl(settings.download_ttl_secs))
    }

    /// Set presigned upload URL TTL.
    #[must_use]
    pub fn with_upload_ttl(mut self, secs: u64) -> Self {
        self.presign_upload_ttl_secs = secs;
        self
    }

    /// Set presigned download URL TTL.
    #[must_use]
    pub fn with_download_ttl(mut self, secs: u64) -> Self {
        self.presign_download_ttl_secs = secs;
        self
    }
}
