use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::{info, warn};

use super::domain::{DiseaseRecord, DiseaseSummary, PredictionRequest, PredictionResponse, UserId};
use super::predictor::{DiseasePredictor, PredictorError};
use super::repository::{DiseaseRepository, PredictionHistory, PredictionRecord};
use crate::workflows::errors::{RepositoryError, ValidationError};

/// Service composing the disease table, the configured predictor, and the
/// per-user prediction history.
pub struct DiagnosisService<R, H> {
    diseases: Arc<R>,
    history: Arc<H>,
    predictor: Arc<dyn DiseasePredictor>,
}

impl<R, H> DiagnosisService<R, H>
where
    R: DiseaseRepository + 'static,
    H: PredictionHistory + 'static,
{
    pub fn new(diseases: Arc<R>, history: Arc<H>, predictor: Arc<dyn DiseasePredictor>) -> Self {
        Self {
            diseases,
            history,
            predictor,
        }
    }

    /// Rank candidate diseases and remember the top one for the caller.
    pub fn predict(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionResponse, DiagnosisServiceError> {
        let PredictionRequest { query, user_id } = request;
        if query.symptoms.is_empty() {
            return Err(ValidationError::MissingSymptoms.into());
        }

        let method = self.predictor.method();
        let predictions = self
            .predictor
            .predict(&query, self.diseases.as_ref())
            .map_err(|err| match err {
                PredictorError::Validation(err) => DiagnosisServiceError::Validation(err),
                PredictorError::Repository(err) => DiagnosisServiceError::Repository(err),
                other => {
                    warn!(?method, error = %other, "disease prediction failed");
                    DiagnosisServiceError::Predictor(other)
                }
            })?;

        info!(
            ?method,
            symptoms = query.symptoms.len(),
            candidates = predictions.len(),
            "ranked disease candidates"
        );

        if let (Some(user), Some(top)) = (user_id.as_ref(), predictions.first()) {
            self.history.append(
                user,
                PredictionRecord {
                    disease: top.disease.clone(),
                    confidence: top.confidence,
                    symptoms: query.symptoms.clone(),
                    recorded_at: Utc::now(),
                },
            )?;
        }

        Ok(PredictionResponse {
            predictions,
            symptoms: query.symptoms,
            user_age: query.age,
            user_gender: query.gender,
            method,
        })
    }

    pub fn diseases(&self) -> Result<Vec<DiseaseSummary>, DiagnosisServiceError> {
        let records = self.diseases.all()?;
        Ok(records.iter().map(DiseaseRecord::summary).collect())
    }

    pub fn disease(&self, name: &str) -> Result<DiseaseRecord, DiagnosisServiceError> {
        let record = self
            .diseases
            .fetch(name)?
            .ok_or_else(|| RepositoryError::NotFound(format!("disease '{name}'")))?;
        Ok(record)
    }

    pub fn history(&self, user: &UserId) -> Result<Vec<PredictionRecord>, DiagnosisServiceError> {
        Ok(self.history.list(user)?)
    }
}

/// Error raised by the diagnosis service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Predictor(PredictorError),
}

impl DiagnosisServiceError {
    /// Status reported over HTTP; model failures map to 502.
    pub fn status(&self) -> StatusCode {
        match self {
            DiagnosisServiceError::Validation(_)
            | DiagnosisServiceError::Predictor(PredictorError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            DiagnosisServiceError::Repository(RepositoryError::NotFound(_))
            | DiagnosisServiceError::Predictor(PredictorError::Repository(
                RepositoryError::NotFound(_),
            )) => StatusCode::NOT_FOUND,
            DiagnosisServiceError::Repository(RepositoryError::Unavailable(_))
            | DiagnosisServiceError::Predictor(PredictorError::Repository(
                RepositoryError::Unavailable(_),
            )) => StatusCode::INTERNAL_SERVER_ERROR,
            DiagnosisServiceError::Predictor(
                PredictorError::Spawn { .. }
                | PredictorError::Exit { .. }
                | PredictorError::Timeout { .. }
                | PredictorError::Output(_)
                | PredictorError::NoPredictions,
            ) => StatusCode::BAD_GATEWAY,
        }
    }
}
