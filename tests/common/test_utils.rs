use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use emotion_relay::{
    analysis::Analyzer,
    config::CorsConfig,
    inference::EmotionClassifier,
    server::{AppState, router},
};
use serde_json::Value;
use std::sync::Arc;

pub fn create_test_app(classifier: Arc<dyn EmotionClassifier>) -> Router {
    create_test_app_with_cors(classifier, &CorsConfig::default())
}

pub fn create_test_app_with_cors(
    classifier: Arc<dyn EmotionClassifier>,
    cors: &CorsConfig,
) -> Router {
    let state = AppState {
        analyzer: Arc::new(Analyzer::new(classifier)),
    };
    router(state, cors).unwrap()
}

pub fn analyze_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
