//! Label attachment handler.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::error::EventError;
use super::notification::ObjectCreated;
use crate::labels::{LabelDetector, LabelQuery, ObjectRef};
use crate::object_key::{ImageObjectKey, decode_notification_key};
use crate::post::{PostKey, RecordStore};

/// Result of handling one object-created event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedLabels {
    /// Record that received the labels.
    #[serde(flatten)]
    pub key: PostKey,
    /// Decoded object key stored as `image`.
    pub image: String,
    /// Labels stored as `label`.
    pub labels: Vec<String>,
}

/// Labels freshly uploaded images and writes the result onto their post.
pub struct LabelAttachmentHandler {
    detector: Arc<dyn LabelDetector>,
    store: Arc<dyn RecordStore>,
    query: LabelQuery,
}

impl LabelAttachmentHandler {
    /// Create a handler.
    #[must_use]
    pub fn new(
        detector: Arc<dyn LabelDetector>,
        store: Arc<dyn RecordStore>,
        query: LabelQuery,
    ) -> Self {
        Self {
            detector,
            store,
            query,
        }
    }

    /// Handle one object-created event.
    ///
    /// The record `(USER#identity, POST#postId)` is upserted, so an upload
    /// that beats its post creation still leaves a record behind.
    ///
    /// # Errors
    ///
    /// Returns `MalformedKey` if the key does not start with
    /// `<identity>/<postId>/`, or the detector or store error otherwise.
    /// Nothing is written on error.
    pub async fn handle(&self, event: &ObjectCreated) -> Result<AttachedLabels, EventError> {
        let decoded = decode_notification_key(&event.key)?;
        let image = ImageObjectKey::parse(&decoded)?;
        let key = PostKey::new(&image.identity, &image.post_id);

        let object = ObjectRef {
            bucket: event.bucket.clone(),
            key: image.key,
        };
        let detected = self.detector.detect_labels(&object, &self.query).await?;
        let labels = self.query.select(detected);

        self.store
            .set_image_labels(&key, &object.key, &labels)
            .await?;

        info!(
            bucket = %object.bucket,
            key = %object.key,
            record = %key,
            labels = ?labels,
            "Labels attached"
        );

        Ok(AttachedLabels {
            key,
            image: object.key,
            labels,
        })
    }

    /// Handle events in order, stopping at the first failure.
    ///
    /// Records already handled before the failure keep their update.
    ///
    /// # Errors
    ///
    /// Returns the first event error together with its position.
    pub async fn handle_all(
        &self,
        events: &[ObjectCreated],
    ) -> Result<Vec<AttachedLabels>, (usize, EventError)> {
        let mut attached = Vec::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            attached.push(self.handle(event).await.map_err(|e| (index, e))?);
        }
        Ok(attached)
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
