mod reduce;

pub use reduce::{round_confidence, top_prediction};

use crate::{
    Error, Result,
    inference::{EmotionClassifier, UpstreamResponse},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a single analysis, serialized as the response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Emotion { emotion: String, confidence: f64 },
    /// Provider-reported failure, passed through verbatim.
    UpstreamError { error: String },
}

pub struct Analyzer {
    classifier: Arc<dyn EmotionClassifier>,
}

impl Analyzer {
    pub fn new(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self { classifier }
    }

    pub async fn analyze(&self, text: &str) -> Result<Analysis> {
        match self.classifier.classify(text).await? {
            UpstreamResponse::Error { message } => {
                info!("Upstream reported error: {}", message);
                Ok(Analysis::UpstreamError { error: message })
            }
            UpstreamResponse::Predictions(batches) => {
                let predictions = batches
                    .first()
                    .ok_or_else(|| Error::upstream_shape("empty response list"))?;
                let top = top_prediction(predictions)
                    .ok_or_else(|| Error::upstream_shape("empty prediction list"))?;

                debug!(
                    "Selected '{}' ({}) out of {} predictions",
                    top.label,
                    top.score,
                    predictions.len()
                );

                Ok(Analysis::Emotion {
                    emotion: top.label.clone(),
                    confidence: round_confidence(top.score),
                })
            }
        }
    }
}
