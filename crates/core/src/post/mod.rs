//! Post records and the operations behind the Post API.
//!
//! This module provides:
//! - Composite record keys (`USER#<identity>`, `POST#<postId>`)
//! - The `RecordStore` seam over the managed key-value store
//! - `PostService` for create, list, delete and upload credentials

mod error;
mod keys;
mod memory;
mod service;
mod store;
mod types;

pub use error::PostError;
pub use keys::{POST_PREFIX, PostId, PostKey, USER_PREFIX};
pub use memory::MemoryRecordStore;
pub use service::PostService;
pub use store::{RecordStore, StoreError};
pub use types::{
    DeleteOutcome, DeleteReport, ImageCleanup, NewPost, PostRecord, PutReceipt, UploadRequest,
    UploadTicket,
};
