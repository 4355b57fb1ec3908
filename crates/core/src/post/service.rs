//! Post service implementation.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::PostError;
use super::keys::{PostId, PostKey};
use super::store::RecordStore;
use super::types::{
    DeleteOutcome, DeleteReport, ImageCleanup, NewPost, PostRecord, PutReceipt, UploadRequest,
    UploadTicket,
};
use crate::identity::Identity;
use crate::object_key::ImageObjectKey;
use crate::storage::ObjectStore;

/// Post service backing the Post API.
///
/// Holds no state of its own; every call goes to the record store or the
/// object store.
pub struct PostService {
    store: Arc<dyn RecordStore>,
    objects: Arc<dyn ObjectStore>,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { store, objects }
    }

    /// Create a text-only post under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store write fails.
    pub async fn create(&self, owner: &Identity, post: NewPost) -> Result<PutReceipt, PostError> {
        info!(title = %post.title, body = %post.body, user = %owner, "Creating post");

        let post_id = PostId::generate();
        let key = PostKey::new(owner, &post_id);

        self.store
            .put(PostRecord::text(key.clone(), post.title, post.body))
            .await?;

        Ok(PutReceipt { key, post_id })
    }

    /// List posts of one user, or of every user when `user` is `None`.
    ///
    /// Stored image keys are swapped for time-limited read links. A key that
    /// cannot be signed is dropped from the record rather than returned raw.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store read fails.
    pub async fn list(&self, user: Option<&str>) -> Result<Vec<PostRecord>, PostError> {
        let records = match user.filter(|u| !u.is_empty()) {
            Some(user) => {
                info!(user = %user, "Listing posts of user");
                self.store.query(&PostKey::partition_for(user)).await?
            }
            None => {
                info!("Listing posts of all users");
                self.store.scan().await?
            }
        };

        let mut signed = Vec::with_capacity(records.len());
        for mut record in records {
            if let Some(object_key) = record.image.take() {
                match self.objects.presign_read(&object_key).await {
                    Ok(presigned) => record.image = Some(presigned.url),
                    Err(e) => {
                        warn!(error = %e, key = %record.key, "Failed to sign image link");
                    }
                }
            }
            signed.push(record);
        }

        Ok(signed)
    }

    /// Delete a post and, best effort, its image.
    ///
    /// A failed image deletion is reported in the outcome but never stops
    /// the record from being removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the record lookup or the record deletion fails.
    pub async fn delete(
        &self,
        owner: &Identity,
        post_id: &PostId,
    ) -> Result<DeleteOutcome, PostError> {
        info!(post_id = %post_id, user = %owner, "Deleting post");

        let key = PostKey::new(owner, post_id);
        let Some(record) = self.store.get(&key).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        let image_cleanup = match record.image.as_deref().filter(|k| !k.is_empty()) {
            None => ImageCleanup::NotApplicable,
            Some(object_key) => match self.objects.delete(object_key).await {
                Ok(()) => ImageCleanup::Deleted,
                Err(e) => {
                    warn!(error = %e, key = %object_key, "Failed to delete image object");
                    ImageCleanup::Failed {
                        reason: e.to_string(),
                    }
                }
            },
        };

        self.store.delete(&key).await?;

        Ok(DeleteOutcome::Deleted(DeleteReport { key, image_cleanup }))
    }

    /// Issue a credential for uploading a post image straight to storage.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` when the identity or post id cannot form an
    /// object key, or a storage error if presigning fails.
    pub async fn request_upload(
        &self,
        owner: &Identity,
        request: UploadRequest,
    ) -> Result<UploadTicket, PostError> {
        let object_key = ImageObjectKey::build(owner, &request.post_id, &request.filename)?;

        let presigned = self
            .objects
            .presign_write(&object_key, &request.content_type)
            .await?;

        info!(
            user = %owner,
            post_id = %request.post_id,
            key = %object_key,
            "Upload URL issued"
        );

        Ok(UploadTicket {
            upload_url: presigned.url,
            method: presigned.method,
            headers: presigned.headers,
            expires_at: presigned.expires_at,
            object_key,
        })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
