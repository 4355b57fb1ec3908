//! Shared configuration and error types for Postagram.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Application configuration loaded from files and the environment
//! - The HTTP-facing error taxonomy

pub mod config;
pub mod error;

pub use config::{
    AppConfig, LabelConfig, ObjectStorageConfig, ObjectStorageProvider, RecordStoreBackend,
    RecordStoreConfig, ServerConfig, is_sql_identifier,
};
pub use error::{AppError, AppResult};
