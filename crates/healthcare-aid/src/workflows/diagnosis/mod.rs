//! Symptom-driven disease ranking: reference records, the matching engine,
//! swappable predictors, and the HTTP surface.

pub mod domain;
pub mod matching;
pub mod predictor;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    AgeGroup, DiseaseRecord, DiseaseSummary, GenderPreference, PredictionMethod,
    PredictionRequest, PredictionResponse, PredictionResult, Severity, SymptomQuery, UserId,
};
pub use matching::{score, symptoms_match, MAX_PREDICTIONS};
pub use predictor::{
    from_backend, DiseasePredictor, ExternalModelPredictor, PredictorError,
    SymptomMatchPredictor,
};
pub use repository::{DiseaseRepository, PredictionHistory, PredictionRecord};
pub use router::diagnosis_router;
pub use service::{DiagnosisService, DiagnosisServiceError};
