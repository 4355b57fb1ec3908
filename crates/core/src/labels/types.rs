//! Label types and the detector seam.

use async_trait::async_trait;
use postagram_shared::LabelConfig;

use super::error::LabelError;

/// Reference to an object in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Bucket name.
    pub bucket: String,
    /// Decoded object key.
    pub key: String,
}

/// One detected label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Label name, e.g. `Cat`.
    pub name: String,
    /// Confidence on a 0..1 scale.
    pub confidence: f32,
}

impl Label {
    /// Create a label.
    #[must_use]
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Limits applied to a detection.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelQuery {
    /// Maximum number of labels kept.
    pub max_labels: i32,
    /// Minimum confidence kept, 0..1.
    pub min_confidence: f32,
}

impl Default for LabelQuery {
    fn default() -> Self {
        Self {
            max_labels: 5,
            min_confidence: 0.75,
        }
    }
}

impl From<&LabelConfig> for LabelQuery {
    fn from(config: &LabelConfig) -> Self {
        Self {
            max_labels: config.max_labels,
            min_confidence: config.min_confidence,
        }
    }
}

impl LabelQuery {
    /// Keeps the names of labels meeting the confidence floor, in detector
    /// order, up to `max_labels`.
    #[must_use]
    pub fn select(&self, labels: Vec<Label>) -> Vec<String> {
        let limit = usize::try_from(self.max_labels).unwrap_or(0);
        labels
            .into_iter()
            .filter(|label| label.confidence >= self.min_confidence)
            .take(limit)
            .map(|label| label.name)
            .collect()
    }
}

/// Service that labels images held in object storage.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detects labels on `object`, honouring `query` where the service can.
    async fn detect_labels(
        &self,
        object: &ObjectRef,
        query: &LabelQuery,
    ) -> Result<Vec<Label>, LabelError>;
}
