use serde::{Deserialize, Serialize};

use crate::workflows::age::Age;

/// Reference description of a disease, read-only to the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRecord {
    pub name: String,
    pub symptoms: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    pub treatment: String,
    pub prevention: String,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub age_group: AgeGroup,
    #[serde(default)]
    pub gender_preference: GenderPreference,
}

impl DiseaseRecord {
    pub fn summary(&self) -> DiseaseSummary {
        DiseaseSummary {
            name: self.name.clone(),
            symptoms: self.symptoms.clone(),
            description: self.description.clone(),
            severity: self.severity,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    #[serde(alias = "young")]
    Child,
    Adult,
    Elderly,
    #[default]
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderPreference {
    Male,
    Female,
    #[default]
    None,
}

/// List view returned by `GET /api/v1/diseases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseSummary {
    pub name: String,
    pub symptoms: Vec<String>,
    pub description: String,
    pub severity: Severity,
}

/// A ranked candidate disease for a symptom query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub disease: String,
    /// Percentage of the disease's declared symptoms that matched, 0-100.
    pub confidence: u8,
    pub description: String,
    pub severity: Severity,
    pub treatment: String,
    pub prevention: String,
    #[serde(default)]
    pub matching_symptoms: Vec<String>,
}

/// Inputs shared by every predictor implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomQuery {
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub age: Option<Age>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Identifier of the user whose prediction history receives the top result.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Body of `POST /api/v1/diseases/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    #[serde(flatten)]
    pub query: SymptomQuery,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    SymptomMatch,
    ExternalModel,
}

/// Response shape for a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub predictions: Vec<PredictionResult>,
    pub symptoms: Vec<String>,
    pub user_age: Option<Age>,
    pub user_gender: Option<String>,
    pub method: PredictionMethod,
}
