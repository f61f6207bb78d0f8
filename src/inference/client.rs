use super::types::*;
use crate::{Error, Result, config::InferenceConfig};
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<UpstreamResponse>;
}

/// Client for a Hugging Face style text-classification endpoint.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HuggingFaceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmotionClassifier for HuggingFaceClient {
    async fn classify(&self, text: &str) -> Result<UpstreamResponse> {
        debug!("Sending {} bytes to {}", text.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            debug!("Upstream responded with {}", status);
        } else {
            warn!("Upstream responded with {}", status);
        }

        UpstreamResponse::decode(&body)
    }
}
