use healthcare_aid::config::ReferenceConfig;
use healthcare_aid::workflows::coverage::{InsurancePlanRecord, PlanId, PlanRepository};
use healthcare_aid::workflows::diagnosis::{
    DiseaseRecord, DiseaseRepository, PredictionHistory, PredictionRecord, UserId,
};
use healthcare_aid::workflows::reference::{ReferenceCatalog, ReferenceError};
use healthcare_aid::workflows::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reference tables held fully in memory for the life of the process.
#[derive(Clone)]
pub(crate) struct InMemoryReferenceStore {
    catalog: Arc<ReferenceCatalog>,
}

impl InMemoryReferenceStore {
    pub(crate) fn new(catalog: ReferenceCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

impl DiseaseRepository for InMemoryReferenceStore {
    fn all(&self) -> Result<Vec<DiseaseRecord>, RepositoryError> {
        Ok(self.catalog.diseases.clone())
    }

    fn fetch(&self, name: &str) -> Result<Option<DiseaseRecord>, RepositoryError> {
        Ok(self.catalog.disease(name).cloned())
    }
}

impl PlanRepository for InMemoryReferenceStore {
    fn all(&self) -> Result<Vec<InsurancePlanRecord>, RepositoryError> {
        Ok(self.catalog.plans.clone())
    }

    fn fetch(&self, id: &PlanId) -> Result<Option<InsurancePlanRecord>, RepositoryError> {
        Ok(self.catalog.plan(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPredictionHistory {
    records: Arc<Mutex<HashMap<UserId, Vec<PredictionRecord>>>>,
}

impl PredictionHistory for InMemoryPredictionHistory {
    fn append(&self, user: &UserId, record: PredictionRecord) -> Result<(), RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("history mutex poisoned".to_string()))?;
        guard.entry(user.clone()).or_default().push(record);
        Ok(())
    }

    fn list(&self, user: &UserId) -> Result<Vec<PredictionRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("history mutex poisoned".to_string()))?;
        Ok(guard.get(user).cloned().unwrap_or_default())
    }
}

/// Load the configured catalog, falling back to the built-in seed data.
pub(crate) fn load_catalog(config: &ReferenceConfig) -> Result<ReferenceCatalog, ReferenceError> {
    let catalog = match &config.data_path {
        Some(path) => ReferenceCatalog::from_path(path)?,
        None => ReferenceCatalog::standard(),
    };

    info!(
        diseases = catalog.diseases.len(),
        plans = catalog.plans.len(),
        source = config
            .data_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "standard".to_string()),
        "reference catalog loaded"
    );
    Ok(catalog)
}
