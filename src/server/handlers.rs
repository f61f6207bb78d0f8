use super::types::{AnalyzeRequest, ErrorResponse};
use crate::{
    Error,
    analysis::{Analysis, Analyzer},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Analysis>, (StatusCode, Json<ErrorResponse>)> {
    let span = info_span!("analyze", request_id = %Uuid::new_v4());

    async move {
        let request = match payload {
            Ok(Json(request)) => request,
            Err(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                return Err(error_response(Error::invalid_request(rejection.body_text())));
            }
        };

        info!("Received analyze request ({} chars)", request.text.chars().count());

        match state.analyzer.analyze(&request.text).await {
            Ok(analysis) => {
                info!("Analysis finished: {:?}", analysis);
                Ok(Json(analysis))
            }
            Err(e) => {
                error!("Failed to analyze text: {}", e);
                Err(error_response(e))
            }
        }
    }
    .instrument(span)
    .await
}

fn error_response(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        err.status_code(),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
