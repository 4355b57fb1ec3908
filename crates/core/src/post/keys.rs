//! Composite keys addressing post records.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Identity;

/// Prefix of every partition key.
pub const USER_PREFIX: &str = "USER#";
/// Prefix of every sort key.
pub const POST_PREFIX: &str = "POST#";

/// Identifier of one post.
///
/// Generated ids are UUID v4 strings, but ids arriving from object keys are
/// taken as-is, so this stays a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Generates a fresh random post id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id, returning `None` when it is empty.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `(partition key, sort key)` pair identifying exactly one post record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostKey {
    /// `USER#<identity>`.
    #[serde(rename = "user")]
    pub partition_key: String,
    /// `POST#<postId>`.
    #[serde(rename = "id")]
    pub sort_key: String,
}

impl PostKey {
    /// Builds the key for a post owned by `owner`.
    #[must_use]
    pub fn new(owner: &Identity, post_id: &PostId) -> Self {
        Self {
            partition_key: Self::partition_for(owner.as_str()),
            sort_key: format!("{POST_PREFIX}{post_id}"),
        }
    }

    /// Partition key holding every post of `user`.
    #[must_use]
    pub fn partition_for(user: &str) -> String {
        format!("{USER_PREFIX}{user}")
    }

    /// The identity part of the partition key, if it carries the prefix.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.partition_key.strip_prefix(USER_PREFIX)
    }

    /// The post id part of the sort key, if it carries the prefix.
    #[must_use]
    pub fn post_id(&self) -> Option<&str> {
        self.sort_key.strip_prefix(POST_PREFIX)
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.partition_key, self.sort_key)
    }
}
