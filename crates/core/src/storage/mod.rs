//! Object storage for post images using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: AWS S3, MinIO, Cloudflare R2
//! - Local filesystem (development only)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                             │
//! │                   (Unified Storage API)                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.presign_read("key", ttl)   │ op.presign_write("key", ttl)    │
//! │ op.delete("key")              │                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bytes never pass through the API: clients upload with a presigned PUT
//! and read back with a presigned GET.

mod config;
mod error;
mod object_store;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use object_store::ObjectStore;
pub use service::{PresignedUrl, StorageService};
