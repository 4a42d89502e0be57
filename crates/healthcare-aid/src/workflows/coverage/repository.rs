use super::domain::{InsurancePlanRecord, PlanId};
use crate::workflows::errors::RepositoryError;

/// Read-only access to the insurance plan reference table.
pub trait PlanRepository: Send + Sync {
    fn all(&self) -> Result<Vec<InsurancePlanRecord>, RepositoryError>;
    fn fetch(&self, id: &PlanId) -> Result<Option<InsurancePlanRecord>, RepositoryError>;
}
