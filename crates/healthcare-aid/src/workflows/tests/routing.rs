use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::coverage::{coverage_router, CoverageService};
use crate::workflows::diagnosis::{
    diagnosis_router, DiagnosisService, ExternalModelPredictor, SymptomMatchPredictor,
};

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

fn diagnosis_app() -> axum::Router {
    let (service, _) = diagnosis_service();
    diagnosis_router(Arc::new(service))
}

fn coverage_app() -> axum::Router {
    coverage_router(Arc::new(coverage_service()))
}

#[tokio::test]
async fn predict_route_returns_camel_case_payload() {
    let response = diagnosis_app()
        .oneshot(post_json(
            "/api/v1/diseases/predict",
            json!({ "symptoms": ["wheezing"], "age": 29, "gender": "male", "userId": "u-1" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["predictions"][0]["disease"], "Asthma");
    assert_eq!(body["predictions"][0]["confidence"], 20);
    assert_eq!(body["predictions"][0]["matchingSymptoms"], json!(["wheezing"]));
    assert_eq!(body["userAge"], 29);
    assert_eq!(body["userGender"], "male");
    assert_eq!(body["method"], "symptom_match");
}

#[tokio::test]
async fn predict_route_rejects_empty_symptoms() {
    let response = diagnosis_app()
        .oneshot(post_json(
            "/api/v1/diseases/predict",
            json!({ "symptoms": [], "age": 29, "gender": "male" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "Symptoms are required");
}

#[tokio::test]
async fn history_route_lists_recorded_predictions() {
    let (service, _) = diagnosis_service();
    let app = diagnosis_router(Arc::new(service));

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/diseases/predict",
            json!({ "symptoms": ["nausea", "vomiting"], "userId": "u-2" }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/api/v1/users/u-2/predictions"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["predictions"][0]["disease"], "Migraine");
    assert_eq!(body["predictions"][0]["confidence"], 40);
    assert!(body["predictions"][0]["recordedAt"].is_string());
}

#[tokio::test]
async fn disease_detail_route_handles_missing_records() {
    let response = diagnosis_app()
        .oneshot(get("/api/v1/diseases/Common%20Cold"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["riskFactors"][0], "Weakened immune system");

    let response = diagnosis_app()
        .oneshot(get("/api/v1/diseases/Gout"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn predict_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(DiagnosisService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryHistory::default()),
        Arc::new(SymptomMatchPredictor),
    ));

    let response = crate::workflows::diagnosis::router::predict_handler::<
        UnavailableRepository,
        MemoryHistory,
    >(
        State(service),
        axum::Json(prediction_request(&["fever"], None)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn predict_handler_maps_model_failure_to_bad_gateway() {
    let service = Arc::new(DiagnosisService::new(
        Arc::new(MemoryReference::default()),
        Arc::new(MemoryHistory::default()),
        Arc::new(CannedPredictor {
            output: canned_failure,
        }),
    ));

    let response = crate::workflows::diagnosis::router::predict_handler::<
        MemoryReference,
        MemoryHistory,
    >(
        State(service),
        axum::Json(prediction_request(&["fever"], None)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[cfg(unix)]
#[tokio::test]
async fn predict_handler_gives_up_on_hung_model() {
    let model = ExternalModelPredictor::new(
        "sh",
        vec!["-c".to_string(), "exec sleep 5".to_string()],
    )
    .with_timeout(Duration::from_millis(200));
    let service = Arc::new(DiagnosisService::new(
        Arc::new(MemoryReference::default()),
        Arc::new(MemoryHistory::default()),
        Arc::new(model),
    ));

    let started = Instant::now();
    let response = crate::workflows::diagnosis::router::predict_handler::<
        MemoryReference,
        MemoryHistory,
    >(
        State(service),
        axum::Json(prediction_request(&["fever"], None)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(started.elapsed() < Duration::from_secs(4));
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("did not answer")));
}

#[tokio::test]
async fn calculate_premium_route_returns_breakdown() {
    let response = coverage_app()
        .oneshot(post_json(
            "/api/v1/insurance/calculate-premium",
            json!({
                "planId": "basic-health",
                "age": 40,
                "gender": "male",
                "medicalConditions": ["Diabetes"]
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["calculation"]["finalPremium"], 4290);
    assert_eq!(body["calculation"]["ageFactor"], 1.0);
    assert_eq!(body["calculation"]["medicalConditionMultiplier"], 1.3);
    assert_eq!(body["plan"]["planName"], "Basic Health Plan");
    assert_eq!(body["userInfo"]["age"], 40);
}

#[tokio::test]
async fn calculate_premium_route_reports_age_range() {
    let response = coverage_app()
        .oneshot(post_json(
            "/api/v1/insurance/calculate-premium",
            json!({ "planId": "basic-health", "age": 15, "gender": "male" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "Age must be between 18 and 65 years");
}

#[tokio::test]
async fn calculate_premium_route_validates_negative_age() {
    let response = coverage_app()
        .oneshot(post_json(
            "/api/v1/insurance/calculate-premium",
            json!({ "planId": "basic-health", "age": -3, "gender": "male" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "Age must be between 18 and 65 years");
}

#[tokio::test]
async fn calculate_premium_route_quotes_fractional_age() {
    let response = coverage_app()
        .oneshot(post_json(
            "/api/v1/insurance/calculate-premium",
            json!({ "planId": "basic-health", "age": 40.5, "gender": "male" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["calculation"]["finalPremium"], 3300);
    assert_eq!(body["userInfo"]["age"], 40.5);
}

#[tokio::test]
async fn calculate_premium_route_reports_unknown_plan() {
    let response = coverage_app()
        .oneshot(post_json(
            "/api/v1/insurance/calculate-premium",
            json!({ "planId": "platinum", "age": 40, "gender": "male" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn compare_route_requires_two_plans() {
    let response = coverage_app()
        .oneshot(post_json(
            "/api/v1/insurance/compare",
            json!({ "planIds": ["basic-health"], "age": 40, "gender": "male" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "At least 2 plans required for comparison");
}

#[tokio::test]
async fn compare_route_sorts_by_premium() {
    let response = coverage_app()
        .oneshot(post_json(
            "/api/v1/insurance/compare",
            json!({
                "planIds": ["comprehensive-health", "basic-health"],
                "age": 40,
                "gender": "other"
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["comparisons"][0]["plan"]["id"], "basic-health");
    assert_eq!(body["comparisons"][0]["premium"], 3150);
    assert_eq!(body["comparisons"][0]["monthlyPremium"], 263);
    assert_eq!(body["comparisons"][1]["premium"], 5125);
    assert_eq!(body["userInfo"]["medicalConditions"], json!([]));
}

#[tokio::test]
async fn plan_routes_list_and_fetch() {
    let app = coverage_app();

    let response = app
        .clone()
        .oneshot(get("/api/v1/insurance/plans"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(4));

    let response = app
        .oneshot(get("/api/v1/insurance/plans/senior-care"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["minAge"], 55);
    assert_eq!(body["genderMultiplier"]["male"], 1.1);
}

#[tokio::test]
async fn coverage_routes_surface_repository_outage() {
    let app = coverage_router(Arc::new(CoverageService::new(Arc::new(UnavailableRepository))));

    let response = app
        .oneshot(get("/api/v1/insurance/plans"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
