//! Object-created notifications and label attachment.
//!
//! The object store emits one notification per committed upload. Each one
//! is handled independently: decode the key, ask the label detector about
//! the image, then write `image` and `label` onto the matching post record.
//! Failures are not retried here; whoever delivered the notification owns
//! redelivery.

mod error;
mod handler;
mod notification;

pub use error::EventError;
pub use handler::{AttachedLabels, LabelAttachmentHandler};
pub use notification::{
    BucketEntity, ObjectCreated, ObjectEntity, ObjectEventNotification, ObjectEventRecord,
    S3Entity,
};
