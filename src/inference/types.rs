use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
}

/// One candidate emotion with the model's score for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// Decoded body of an inference call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResponse {
    /// The provider refused the request, e.g. because the model is still loading.
    Error { message: String },
    /// One prediction list per input; the relay always sends a single input.
    Predictions(Vec<Vec<Prediction>>),
}

impl UpstreamResponse {
    /// Decodes a raw body. The error shape is tried first, then the nested
    /// prediction list; anything else is an [`Error::UpstreamShape`].
    pub fn decode(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            Error::upstream_shape(format!("body is not JSON ({}): {}", e, preview(body)))
        })?;

        match value {
            Value::Object(map) if map.contains_key("error") => match map.get("error") {
                Some(Value::String(message)) => Ok(Self::Error {
                    message: message.clone(),
                }),
                _ => Err(Error::upstream_shape(format!(
                    "error field is not a string: {}",
                    preview(body)
                ))),
            },
            Value::Array(items) => serde_json::from_value(Value::Array(items))
                .map(Self::Predictions)
                .map_err(|e| {
                    Error::upstream_shape(format!("malformed prediction list ({}): {}", e, preview(body)))
                }),
            _ => Err(Error::upstream_shape(format!(
                "expected an error object or a prediction list: {}",
                preview(body)
            ))),
        }
    }
}

fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > BODY_PREVIEW_CHARS {
        let head: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_predictions() {
        let body = br#"[[{"label": "joy", "score": 0.95}, {"label": "neutral", "score": 0.03}]]"#;

        let decoded = UpstreamResponse::decode(body).unwrap();

        assert_eq!(
            decoded,
            UpstreamResponse::Predictions(vec![vec![
                Prediction {
                    label: "joy".to_string(),
                    score: 0.95
                },
                Prediction {
                    label: "neutral".to_string(),
                    score: 0.03
                },
            ]])
        );
    }

    #[test]
    fn test_decode_error_object() {
        let body = br#"{"error": "Model is currently loading", "estimated_time": 20.0}"#;

        let decoded = UpstreamResponse::decode(body).unwrap();

        assert_eq!(
            decoded,
            UpstreamResponse::Error {
                message: "Model is currently loading".to_string()
            }
        );
    }

    #[test]
    fn test_decode_empty_list_is_not_an_error_here() {
        // Emptiness is judged by the analyzer, not the decoder.
        assert_eq!(
            UpstreamResponse::decode(b"[]").unwrap(),
            UpstreamResponse::Predictions(vec![])
        );
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = UpstreamResponse::decode(b"<html>Bad Gateway</html>").unwrap_err();

        assert!(matches!(err, Error::UpstreamShape(_)));
        assert!(err.to_string().contains("<html>Bad Gateway</html>"));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let err = UpstreamResponse::decode(br#"[[{"label": "joy"}]]"#).unwrap_err();

        assert!(matches!(err, Error::UpstreamShape(_)));
    }

    #[test]
    fn test_decode_rejects_flat_list() {
        let err = UpstreamResponse::decode(br#"[{"label": "joy", "score": 0.9}]"#).unwrap_err();

        assert!(matches!(err, Error::UpstreamShape(_)));
    }

    #[test]
    fn test_decode_rejects_unknown_object() {
        let err = UpstreamResponse::decode(br#"{"status": "ok"}"#).unwrap_err();

        assert!(matches!(err, Error::UpstreamShape(_)));
    }

    #[test]
    fn test_decode_rejects_non_string_error() {
        let err = UpstreamResponse::decode(br#"{"error": {"code": 503}}"#).unwrap_err();

        assert!(matches!(err, Error::UpstreamShape(_)));
    }

    #[test]
    fn test_preview_truncates_long_bodies() {
        let body = "x".repeat(500);

        let shown = preview(body.as_bytes());

        assert_eq!(shown.len(), BODY_PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_request_serialization() {
        let request = InferenceRequest {
            inputs: "I am so happy today",
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"inputs": "I am so happy today"})
        );
    }
}
