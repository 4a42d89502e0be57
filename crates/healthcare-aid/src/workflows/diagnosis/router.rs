use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{PredictionRequest, UserId};
use super::repository::{DiseaseRepository, PredictionHistory};
use super::service::{DiagnosisService, DiagnosisServiceError};

/// Router exposing disease lookup, prediction, and prediction history.
pub fn diagnosis_router<R, H>(service: Arc<DiagnosisService<R, H>>) -> Router
where
    R: DiseaseRepository + 'static,
    H: PredictionHistory + 'static,
{
    Router::new()
        .route("/api/v1/diseases", get(list_handler::<R, H>))
        .route("/api/v1/diseases/predict", post(predict_handler::<R, H>))
        .route("/api/v1/diseases/:name", get(detail_handler::<R, H>))
        .route(
            "/api/v1/users/:user_id/predictions",
            get(history_handler::<R, H>),
        )
        .with_state(service)
}

pub(crate) async fn predict_handler<R, H>(
    State(service): State<Arc<DiagnosisService<R, H>>>,
    Json(request): Json<PredictionRequest>,
) -> Response
where
    R: DiseaseRepository + 'static,
    H: PredictionHistory + 'static,
{
    // Predictors may block on a child process.
    let outcome = tokio::task::spawn_blocking(move || service.predict(request)).await;
    match outcome {
        Ok(Ok(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => {
            error!(error = %join_error, "prediction task failed");
            let payload = json!({ "error": "prediction task failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<R, H>(
    State(service): State<Arc<DiagnosisService<R, H>>>,
) -> Response
where
    R: DiseaseRepository + 'static,
    H: PredictionHistory + 'static,
{
    match service.diseases() {
        Ok(diseases) => (StatusCode::OK, Json(diseases)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R, H>(
    State(service): State<Arc<DiagnosisService<R, H>>>,
    Path(name): Path<String>,
) -> Response
where
    R: DiseaseRepository + 'static,
    H: PredictionHistory + 'static,
{
    match service.disease(&name) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R, H>(
    State(service): State<Arc<DiagnosisService<R, H>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: DiseaseRepository + 'static,
    H: PredictionHistory + 'static,
{
    match service.history(&UserId(user_id)) {
        Ok(predictions) => {
            (StatusCode::OK, Json(json!({ "predictions": predictions }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: DiagnosisServiceError) -> Response {
    let status = error.status();
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
