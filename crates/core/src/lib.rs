//! Core business logic for Postagram.
//!
//! This crate contains the post domain with no web framework or database
//! dependencies. External collaborators sit behind traits so binaries can
//! inject real clients and tests can inject fakes.
//!
//! # Modules
//!
//! - `identity` - Opaque caller identity
//! - `post` - Post records, keys, the record store seam and `PostService`
//! - `object_key` - Building and parsing `identity/postId/filename` keys
//! - `storage` - Object storage and URL signing via OpenDAL
//! - `labels` - Image label detection
//! - `events` - Object-created notifications and label attachment

pub mod events;
pub mod identity;
pub mod labels;
pub mod object_key;
pub mod post;
pub mod storage;

pub use identity::Identity;
