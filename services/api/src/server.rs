use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryPredictionHistory, InMemoryReferenceStore};
use crate::routes::with_advisory_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use healthcare_aid::config::AppConfig;
use healthcare_aid::error::AppError;
use healthcare_aid::telemetry;
use healthcare_aid::workflows::coverage::CoverageService;
use healthcare_aid::workflows::diagnosis::{self, DiagnosisService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryReferenceStore::new(load_catalog(&config.reference)?));
    let history = Arc::new(InMemoryPredictionHistory::default());
    let predictor = diagnosis::from_backend(&config.prediction.backend);
    let predictor_method = predictor.method();

    let diagnosis_service = Arc::new(DiagnosisService::new(store.clone(), history, predictor));
    let coverage_service = Arc::new(CoverageService::new(store));

    let app = with_advisory_routes(diagnosis_service, coverage_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, ?predictor_method, %addr, "healthcare aid service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
