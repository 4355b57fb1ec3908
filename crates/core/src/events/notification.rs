//! Object-store notification documents.
//!
//! The S3 event shape, which MinIO and other S3-compatible stores also emit:
//!
//! ```json
//! {"Records": [{"eventName": "ObjectCreated:Put",
//!               "s3": {"bucket": {"name": "images"},
//!                      "object": {"key": "alice/abc-123/photo+one.jpg"}}}]}
//! ```

use serde::Deserialize;

/// A notification document, possibly batching several records.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEventNotification {
    /// Event records.
    #[serde(rename = "Records", default)]
    pub records: Vec<ObjectEventRecord>,
}

/// One event record.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEventRecord {
    /// Event name, e.g. `ObjectCreated:Put` or `s3:ObjectCreated:Put`.
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    /// Storage details.
    pub s3: S3Entity,
}

/// Storage part of an event record.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    /// Bucket the object lives in.
    pub bucket: BucketEntity,
    /// The object itself.
    pub object: ObjectEntity,
}

/// Bucket part of an event record.
#[derive(Debug, Clone, Deserialize)]
pub struct BucketEntity {
    /// Bucket name.
    pub name: String,
}

/// Object part of an event record.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntity {
    /// Object key, still escaped.
    pub key: String,
}

/// An object-created event reduced to what the handler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCreated {
    /// Bucket name.
    pub bucket: String,
    /// Object key as it appears in the notification (escaped).
    pub key: String,
}

impl ObjectEventRecord {
    /// Whether this record reports a newly created object.
    ///
    /// Records without an event name are assumed to be creations.
    #[must_use]
    pub fn is_object_created(&self) -> bool {
        self.event_name
            .as_deref()
            .is_none_or(|name| name.contains("ObjectCreated"))
    }
}

impl ObjectEventNotification {
    /// The object-created events carried by this document, in order.
    #[must_use]
    pub fn object_created(self) -> Vec<ObjectCreated> {
        self.records
            .into_iter()
            .filter(ObjectEventRecord::is_object_created)
            .map(|record| ObjectCreated {
                bucket: record.s3.bucket.name,
                key: record.s3.object.key,
            })
            .collect()
    }
}
