//! Post types and data structures.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::keys::{PostId, PostKey};

/// A post as held by the record store.
///
/// `image` and `label` are only present once the label attachment handler
/// has run. A record written by that handler before the post was created
/// carries neither `title` nor `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Composite key.
    #[serde(flatten)]
    pub key: PostKey,
    /// Post title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Post body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Object key of the uploaded image, or a signed link once listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Labels detected on the image, in detector order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Vec<String>>,
}

impl PostRecord {
    /// A freshly created text-only post.
    #[must_use]
    pub fn text(key: PostKey, title: String, body: String) -> Self {
        Self {
            key,
            title: Some(title),
            body: Some(body),
            image: None,
            label: None,
        }
    }

    /// A record holding only the image attributes.
    #[must_use]
    pub fn image_only(key: PostKey, image: String, label: Vec<String>) -> Self {
        Self {
            key,
            title: None,
            body: None,
            image: Some(image),
            label: Some(label),
        }
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
}

/// Acknowledgment of a record write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PutReceipt {
    /// Key of the written record.
    #[serde(flatten)]
    pub key: PostKey,
    /// Generated post id, for requesting an upload credential.
    pub post_id: PostId,
}

/// Outcome of the best-effort image removal during delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCleanup {
    /// The record had no image.
    NotApplicable,
    /// The image object was deleted.
    Deleted,
    /// The image object could not be deleted; the record was still removed.
    Failed {
        /// Why the object store refused.
        reason: String,
    },
}

impl ImageCleanup {
    /// Stable name for API responses.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::Deleted => "deleted",
            Self::Failed { .. } => "failed",
        }
    }
}

/// What a successful delete did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    /// Key of the removed record.
    pub key: PostKey,
    /// Side cleanup of the associated image.
    pub image_cleanup: ImageCleanup,
}

/// Primary outcome of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record existed and was removed.
    Deleted(DeleteReport),
    /// No record matched; nothing was touched.
    NotFound,
}

/// Request for a direct-upload credential.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Post the image belongs to.
    pub post_id: PostId,
    /// Client-chosen filename.
    pub filename: String,
    /// MIME type the client will upload.
    pub content_type: String,
}

/// Credential for uploading one image straight to object storage.
#[derive(Debug, Clone, Serialize)]
pub struct UploadTicket {
    /// Presigned upload URL.
    pub upload_url: String,
    /// HTTP method to use.
    pub method: String,
    /// Headers the upload must carry.
    pub headers: HashMap<String, String>,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
    /// Object key the upload will land at.
    pub object_key: String,
}
