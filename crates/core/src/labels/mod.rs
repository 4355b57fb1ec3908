//! Image label detection.
//!
//! A [`LabelDetector`] names what an uploaded image shows. The AWS
//! Rekognition adapter is the production detector; the label attachment
//! handler only sees the trait.

mod error;
mod rekognition;
mod types;

pub use error::LabelError;
pub use rekognition::RekognitionDetector;
pub use types::{Label, LabelDetector, LabelQuery, ObjectRef};
