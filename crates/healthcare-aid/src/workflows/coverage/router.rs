use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{ComparisonRequest, PlanId, PremiumRequest};
use super::repository::PlanRepository;
use super::service::{CoverageService, CoverageServiceError};

/// Router exposing the plan catalog, premium quotes, and comparisons.
pub fn coverage_router<R>(service: Arc<CoverageService<R>>) -> Router
where
    R: PlanRepository + 'static,
{
    Router::new()
        .route("/api/v1/insurance/plans", get(list_handler::<R>))
        .route("/api/v1/insurance/plans/:plan_id", get(detail_handler::<R>))
        .route(
            "/api/v1/insurance/calculate-premium",
            post(calculate_handler::<R>),
        )
        .route("/api/v1/insurance/compare", post(compare_handler::<R>))
        .with_state(service)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<CoverageService<R>>>) -> Response
where
    R: PlanRepository + 'static,
{
    match service.plans() {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<CoverageService<R>>>,
    Path(plan_id): Path<String>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.plan(&PlanId(plan_id)) {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn calculate_handler<R>(
    State(service): State<Arc<CoverageService<R>>>,
    Json(request): Json<PremiumRequest>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.calculate(request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn compare_handler<R>(
    State(service): State<Arc<CoverageService<R>>>,
    Json(request): Json<ComparisonRequest>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.compare(request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CoverageServiceError) -> Response {
    let status = error.status();
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
