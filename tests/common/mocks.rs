use async_trait::async_trait;
use emotion_relay::{
    Error, Result,
    inference::{EmotionClassifier, Prediction, UpstreamResponse},
};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock classifier returning a fixed response or error
pub struct MockClassifier {
    pub response: Option<UpstreamResponse>,
    pub error: Option<fn() -> Error>,
    pub requests: Arc<Mutex<Vec<String>>>,
    /// Requests with this text wait until `release` is notified
    pub blocked_text: Option<String>,
    pub release: Arc<Notify>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            response: None,
            error: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            blocked_text: None,
            release: Arc::new(Notify::new()),
        }
    }

    pub fn with_response(mut self, response: UpstreamResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_predictions(self, predictions: &[(&str, f64)]) -> Self {
        let predictions = predictions
            .iter()
            .map(|(label, score)| Prediction {
                label: label.to_string(),
                score: *score,
            })
            .collect();
        self.with_response(UpstreamResponse::Predictions(vec![predictions]))
    }

    pub fn with_error(mut self, error: fn() -> Error) -> Self {
        self.error = Some(error);
        self
    }

    pub fn blocking_on(mut self, text: &str) -> Self {
        self.blocked_text = Some(text.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmotionClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<UpstreamResponse> {
        self.requests.lock().unwrap().push(text.to_string());

        if self.blocked_text.as_deref() == Some(text) {
            self.release.notified().await;
        }

        if let Some(error) = self.error {
            return Err(error());
        }

        self.response
            .clone()
            .ok_or_else(|| Error::upstream_shape("no mock response configured"))
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}
