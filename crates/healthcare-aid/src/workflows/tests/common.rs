use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::age::Age;
use crate::workflows::coverage::{CoverageService, InsurancePlanRecord, PlanId, PlanRepository};
use crate::workflows::diagnosis::{
    DiagnosisService, DiseasePredictor, DiseaseRecord, DiseaseRepository, PredictionHistory,
    PredictionMethod, PredictionRecord, PredictionRequest, PredictionResult, PredictorError,
    Severity, SymptomMatchPredictor, SymptomQuery, UserId,
};
use crate::workflows::errors::RepositoryError;
use crate::workflows::reference::ReferenceCatalog;

#[derive(Clone)]
pub(super) struct MemoryReference {
    catalog: Arc<ReferenceCatalog>,
}

impl Default for MemoryReference {
    fn default() -> Self {
        Self {
            catalog: Arc::new(ReferenceCatalog::standard()),
        }
    }
}

impl DiseaseRepository for MemoryReference {
    fn all(&self) -> Result<Vec<DiseaseRecord>, RepositoryError> {
        Ok(self.catalog.diseases.clone())
    }

    fn fetch(&self, name: &str) -> Result<Option<DiseaseRecord>, RepositoryError> {
        Ok(self.catalog.disease(name).cloned())
    }
}

impl PlanRepository for MemoryReference {
    fn all(&self) -> Result<Vec<InsurancePlanRecord>, RepositoryError> {
        Ok(self.catalog.plans.clone())
    }

    fn fetch(&self, id: &PlanId) -> Result<Option<InsurancePlanRecord>, RepositoryError> {
        Ok(self.catalog.plan(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryHistory {
    records: Arc<Mutex<HashMap<UserId, Vec<PredictionRecord>>>>,
}

impl PredictionHistory for MemoryHistory {
    fn append(&self, user: &UserId, record: PredictionRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("history mutex poisoned")
            .entry(user.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    fn list(&self, user: &UserId) -> Result<Vec<PredictionRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("history mutex poisoned")
            .get(user)
            .cloned()
            .unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl DiseaseRepository for UnavailableRepository {
    fn all(&self) -> Result<Vec<DiseaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _name: &str) -> Result<Option<DiseaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl PlanRepository for UnavailableRepository {
    fn all(&self) -> Result<Vec<InsurancePlanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PlanId) -> Result<Option<InsurancePlanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Stand-in for the external model: returns canned output, ignoring the table.
pub(super) struct CannedPredictor {
    pub(super) output: fn() -> Result<Vec<PredictionResult>, PredictorError>,
}

impl DiseasePredictor for CannedPredictor {
    fn method(&self) -> PredictionMethod {
        PredictionMethod::ExternalModel
    }

    fn predict(
        &self,
        _query: &SymptomQuery,
        _diseases: &dyn DiseaseRepository,
    ) -> Result<Vec<PredictionResult>, PredictorError> {
        (self.output)()
    }
}

pub(super) fn canned_influenza() -> Result<Vec<PredictionResult>, PredictorError> {
    Ok(vec![PredictionResult {
        disease: "Influenza".to_string(),
        confidence: 74,
        description: "flu".to_string(),
        severity: Severity::Medium,
        treatment: "rest".to_string(),
        prevention: "vaccine".to_string(),
        matching_symptoms: Vec::new(),
    }])
}

pub(super) fn canned_failure() -> Result<Vec<PredictionResult>, PredictorError> {
    Err(PredictorError::NoPredictions)
}

pub(super) fn diagnosis_service() -> (
    DiagnosisService<MemoryReference, MemoryHistory>,
    MemoryHistory,
) {
    let history = MemoryHistory::default();
    let service = DiagnosisService::new(
        Arc::new(MemoryReference::default()),
        Arc::new(history.clone()),
        Arc::new(SymptomMatchPredictor),
    );
    (service, history)
}

pub(super) fn coverage_service() -> CoverageService<MemoryReference> {
    CoverageService::new(Arc::new(MemoryReference::default()))
}

pub(super) fn prediction_request(symptoms: &[&str], user: Option<&str>) -> PredictionRequest {
    PredictionRequest {
        query: SymptomQuery {
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            age: Some(Age::from(34)),
            gender: Some("female".to_string()),
        },
        user_id: user.map(|id| UserId(id.to_string())),
    }
}

pub(super) fn plan_id(value: &str) -> PlanId {
    PlanId(value.to_string())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
