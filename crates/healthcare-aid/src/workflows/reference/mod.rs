//! Reference tables loaded once at startup and shared read-only.

mod standard;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::coverage::{InsurancePlanRecord, PlanId};
use super::diagnosis::DiseaseRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    #[serde(default)]
    pub diseases: Vec<DiseaseRecord>,
    #[serde(default)]
    pub plans: Vec<InsurancePlanRecord>,
}

impl ReferenceCatalog {
    /// Built-in seed dataset.
    pub fn standard() -> Self {
        Self {
            diseases: standard::diseases(),
            plans: standard::plans(),
        }
    }

    /// Parse and validate a JSON catalog `{ "diseases": [...], "plans": [...] }`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReferenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn disease(&self, name: &str) -> Option<&DiseaseRecord> {
        self.diseases.iter().find(|disease| disease.name == name)
    }

    pub fn plan(&self, id: &PlanId) -> Option<&InsurancePlanRecord> {
        self.plans.iter().find(|plan| &plan.id == id)
    }

    /// Check the record invariants the engines rely on.
    pub fn validate(&self) -> Result<(), ReferenceError> {
        let mut names = HashSet::new();
        for disease in &self.diseases {
            if !names.insert(disease.name.as_str()) {
                return Err(ReferenceError::Duplicate(format!("disease '{}'", disease.name)));
            }
            if disease.symptoms.is_empty() {
                return Err(ReferenceError::Invalid(format!(
                    "disease '{}' declares no symptoms",
                    disease.name
                )));
            }
        }

        let mut ids = HashSet::new();
        for plan in &self.plans {
            if !ids.insert(&plan.id) {
                return Err(ReferenceError::Duplicate(format!("plan '{}'", plan.id)));
            }
            let multipliers = [
                ("basePremium", plan.base_premium),
                ("ageMultiplier", plan.age_multiplier),
                ("genderMultiplier.male", plan.gender_multiplier.male),
                ("genderMultiplier.female", plan.gender_multiplier.female),
                ("genderMultiplier.other", plan.gender_multiplier.other),
                ("medicalConditionMultiplier", plan.medical_condition_multiplier),
            ];
            if let Some((field, value)) = multipliers
                .iter()
                .find(|(_, value)| !(value.is_finite() && *value > 0.0))
            {
                return Err(ReferenceError::Invalid(format!(
                    "plan '{}' has non-positive {field} ({value})",
                    plan.id
                )));
            }
            if plan.min_age > plan.max_age {
                return Err(ReferenceError::Invalid(format!(
                    "plan '{}' has minAge {} above maxAge {}",
                    plan.id, plan.min_age, plan.max_age
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to read reference data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("reference data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {0} in reference data")]
    Duplicate(String),
    #[error("invalid reference data: {0}")]
    Invalid(String),
}
