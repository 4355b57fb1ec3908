//! AWS Rekognition label detector.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_rekognition::Client;
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::types::{Image, S3Object};
use tracing::debug;

use super::error::LabelError;
use super::types::{Label, LabelDetector, LabelQuery, ObjectRef};

/// Rekognition reports confidence as a percentage.
const PERCENT: f32 = 100.0;

/// Label detector calling Rekognition `DetectLabels` on S3 objects.
#[derive(Debug, Clone)]
pub struct RekognitionDetector {
    client: Client,
}

impl RekognitionDetector {
    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS configuration chain.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl LabelDetector for RekognitionDetector {
    async fn detect_labels(
        &self,
        object: &ObjectRef,
        query: &LabelQuery,
    ) -> Result<Vec<Label>, LabelError> {
        let image = Image::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(&object.bucket)
                    .name(&object.key)
                    .build(),
            )
            .build();

        let output = self
            .client
            .detect_labels()
            .image(image)
            .max_labels(query.max_labels)
            .min_confidence(query.min_confidence * PERCENT)
            .send()
            .await
            .map_err(|e| LabelError::service(DisplayErrorContext(&e).to_string()))?;

        debug!(
            bucket = %object.bucket,
            key = %object.key,
            count = output.labels().len(),
            "Rekognition answered"
        );

        Ok(output
            .labels()
            .iter()
            .filter_map(|label| {
                Some(Label::new(
                    label.name()?,
                    label.confidence().unwrap_or_default() / PERCENT,
                ))
            })
            .collect())
    }
}
