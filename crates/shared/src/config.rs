//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store configuration.
    pub record_store: RecordStoreConfig,
    /// Object storage configuration.
    pub storage: ObjectStorageConfig,
    /// Label detection configuration.
    #[serde(default)]
    pub labels: LabelConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Which record store implementation backs the posts table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStoreBackend {
    /// Postgres through SeaORM.
    #[default]
    Postgres,
    /// Process-local map (development only).
    Memory,
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordStoreConfig {
    /// Table holding post records.
    pub table: String,
    /// Store implementation.
    #[serde(default)]
    pub backend: RecordStoreBackend,
    /// Database connection URL (required for the Postgres backend).
    #[serde(default)]
    pub database_url: Option<String>,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Object storage provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStorageProvider {
    /// S3-compatible storage.
    #[default]
    S3,
    /// Local filesystem (development only).
    Local,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectStorageConfig {
    /// Bucket holding uploaded images.
    pub bucket: String,
    /// Storage provider.
    #[serde(default)]
    pub provider: ObjectStorageProvider,
    /// Custom S3 endpoint (MinIO, R2, ...).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Storage region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID. Falls back to the default credential chain when unset.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Root directory for the local provider.
    #[serde(default)]
    pub root: Option<String>,
    /// Presigned upload URL TTL in seconds.
    #[serde(default = "default_upload_ttl")]
    pub upload_ttl_secs: u64,
    /// Presigned download URL TTL in seconds.
    #[serde(default = "default_download_ttl")]
    pub download_ttl_secs: u64,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_upload_ttl() -> u64 {
    900 // 15 minutes
}

fn default_download_ttl() -> u64 {
    3600 // 1 hour
}

/// Label detection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelConfig {
    /// Maximum number of labels attached to a post.
    #[serde(default = "default_max_labels")]
    pub max_labels: i32,
    /// Minimum confidence on a 0..1 scale.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    /// Region override for the labeling service.
    #[serde(default)]
    pub region: Option<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            max_labels: default_max_labels(),
            min_confidence: default_min_confidence(),
            region: None,
        }
    }
}

fn default_max_labels() -> i32 {
    5
}

fn default_min_confidence() -> f32 {
    0.75
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// `DYNAMO_TABLE` and `BUCKET` are honoured as overrides for the table
    /// and bucket names.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or a required
    /// value is missing or invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("POSTAGRAM").separator("__"))
            .set_override_option("record_store.table", std::env::var("DYNAMO_TABLE").ok())?
            .set_override_option("storage.bucket", std::env::var("BUCKET").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the rules deserialization cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first violated rule.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let table = self.record_store.table.as_str();
        if table.is_empty() {
            return Err(invalid("record_store.table must not be empty"));
        }
        if !is_sql_identifier(table) {
            return Err(invalid(format!(
                "record_store.table '{table}' is not a valid table name"
            )));
        }

        if self.storage.bucket.trim().is_empty() {
            return Err(invalid("storage.bucket must not be empty"));
        }

        if self.record_store.backend == RecordStoreBackend::Postgres
            && self
                .record_store
                .database_url
                .as_deref()
                .is_none_or(|url| url.trim().is_empty())
        {
            return Err(invalid(
                "record_store.database_url is required for the postgres backend",
            ));
        }

        if self.storage.provider == ObjectStorageProvider::Local && self.storage.root.is_none() {
            return Err(invalid("storage.root is required for the local provider"));
        }

        if self.labels.max_labels < 1 {
            return Err(invalid("labels.max_labels must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.labels.min_confidence) {
            return Err(invalid("labels.min_confidence must be within 0..=1"));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> config::ConfigError {
    config::ConfigError::Message(msg.into())
}

/// Returns true for `[A-Za-z_][A-Za-z0-9_]*`, the table names the record
/// store accepts.
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
