use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{DiseaseRecord, UserId};
use crate::workflows::errors::RepositoryError;

/// Read-only access to the disease reference table.
pub trait DiseaseRepository: Send + Sync {
    /// Every record, in load order.
    fn all(&self) -> Result<Vec<DiseaseRecord>, RepositoryError>;
    fn fetch(&self, name: &str) -> Result<Option<DiseaseRecord>, RepositoryError>;
}

/// Append-only log of the top prediction handed to each user.
pub trait PredictionHistory: Send + Sync {
    fn append(&self, user: &UserId, record: PredictionRecord) -> Result<(), RepositoryError>;
    fn list(&self, user: &UserId) -> Result<Vec<PredictionRecord>, RepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub disease: String,
    pub confidence: u8,
    pub symptoms: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}
