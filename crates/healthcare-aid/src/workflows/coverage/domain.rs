use serde::{Deserialize, Serialize};

use super::rating::RatingDefaults;
use crate::workflows::age::Age;

/// Identifier assigned to a plan by the reference store.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub String);

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insurance plan rate table, read-only to the rating engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePlanRecord {
    pub id: PlanId,
    pub provider: String,
    pub plan_name: String,
    pub base_premium: f64,
    pub coverage: String,
    #[serde(default = "RatingDefaults::neutral")]
    pub age_multiplier: f64,
    #[serde(default)]
    pub gender_multiplier: GenderMultipliers,
    #[serde(default = "RatingDefaults::neutral")]
    pub medical_condition_multiplier: f64,
    #[serde(default = "RatingDefaults::min_age")]
    pub min_age: u32,
    #[serde(default = "RatingDefaults::max_age")]
    pub max_age: u32,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
}

impl InsurancePlanRecord {
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            id: self.id.clone(),
            provider: self.provider.clone(),
            plan_name: self.plan_name.clone(),
            coverage: self.coverage.clone(),
            description: self.description.clone(),
            features: self.features.clone(),
            exclusions: self.exclusions.clone(),
        }
    }

    pub fn listing(&self) -> PlanListing {
        PlanListing {
            id: self.id.clone(),
            provider: self.provider.clone(),
            plan_name: self.plan_name.clone(),
            base_premium: self.base_premium,
            coverage: self.coverage.clone(),
            description: self.description.clone(),
            features: self.features.clone(),
        }
    }
}

/// Multiplier per gender key; every key falls back to the neutral 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderMultipliers {
    #[serde(default = "RatingDefaults::neutral")]
    pub male: f64,
    #[serde(default = "RatingDefaults::neutral")]
    pub female: f64,
    #[serde(default = "RatingDefaults::neutral")]
    pub other: f64,
}

impl Default for GenderMultipliers {
    fn default() -> Self {
        Self {
            male: RatingDefaults::NEUTRAL_MULTIPLIER,
            female: RatingDefaults::NEUTRAL_MULTIPLIER,
            other: RatingDefaults::NEUTRAL_MULTIPLIER,
        }
    }
}

impl GenderMultipliers {
    pub fn get(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Other => self.other,
        }
    }

    /// Unrecognized genders rate at the neutral multiplier.
    pub fn for_key(&self, key: &str) -> f64 {
        Gender::parse(key)
            .map(|gender| self.get(gender))
            .unwrap_or(RatingDefaults::NEUTRAL_MULTIPLIER)
    }
}

/// Gender keys a plan can price differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Applicant attributes that drive the premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub age: Age,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
}

/// Plan fields echoed alongside a quote or comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub id: PlanId,
    pub provider: String,
    pub plan_name: String,
    pub coverage: String,
    pub description: String,
    pub features: Vec<String>,
    pub exclusions: Vec<String>,
}

/// Catalog view returned by `GET /api/v1/insurance/plans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanListing {
    pub id: PlanId,
    pub provider: String,
    pub plan_name: String,
    pub base_premium: f64,
    pub coverage: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Factors applied while composing a premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumBreakdown {
    pub base_premium: f64,
    /// Rounded to two decimals for display; the premium uses full precision.
    pub age_factor: f64,
    pub gender_multiplier: f64,
    /// The plan's multiplier when conditions were declared, else 1.0.
    pub medical_condition_multiplier: f64,
    pub final_premium: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumCalculation {
    pub plan: PlanSummary,
    pub calculation: PremiumBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanComparison {
    pub plan: PlanSummary,
    pub premium: u64,
    pub monthly_premium: u64,
}

/// Body of `POST /api/v1/insurance/calculate-premium`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumRequest {
    pub plan_id: PlanId,
    #[serde(flatten)]
    pub profile: RiskProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumResponse {
    #[serde(flatten)]
    pub quote: PremiumCalculation,
    pub user_info: RiskProfile,
}

/// Body of `POST /api/v1/insurance/compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    #[serde(default)]
    pub plan_ids: Vec<PlanId>,
    #[serde(flatten)]
    pub profile: RiskProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    pub comparisons: Vec<PlanComparison>,
    pub user_info: RiskProfile,
}
