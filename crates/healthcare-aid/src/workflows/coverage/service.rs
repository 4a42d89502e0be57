use std::sync::Arc;

use axum::http::StatusCode;
use tracing::info;

use super::domain::{
    ComparisonRequest, ComparisonResponse, InsurancePlanRecord, PlanId, PlanListing,
    PremiumRequest, PremiumResponse,
};
use super::rating::{self, RatingDefaults};
use super::repository::PlanRepository;
use crate::workflows::errors::{RepositoryError, ValidationError};

/// Service resolving plans from the reference store and pricing them.
pub struct CoverageService<R> {
    plans: Arc<R>,
}

impl<R> CoverageService<R>
where
    R: PlanRepository + 'static,
{
    pub fn new(plans: Arc<R>) -> Self {
        Self { plans }
    }

    pub fn plans(&self) -> Result<Vec<PlanListing>, CoverageServiceError> {
        let plans = self.plans.all()?;
        Ok(plans.iter().map(InsurancePlanRecord::listing).collect())
    }

    pub fn plan(&self, id: &PlanId) -> Result<InsurancePlanRecord, CoverageServiceError> {
        Ok(self.resolve(id)?)
    }

    /// Quote one plan for the applicant.
    pub fn calculate(
        &self,
        request: PremiumRequest,
    ) -> Result<PremiumResponse, CoverageServiceError> {
        let PremiumRequest { plan_id, profile } = request;
        let plan = self.resolve(&plan_id)?;
        let quote = rating::rate(&plan, &profile)?;

        info!(
            plan = %plan_id,
            age = profile.age.years(),
            final_premium = quote.calculation.final_premium,
            "quoted premium"
        );

        Ok(PremiumResponse {
            quote,
            user_info: profile,
        })
    }

    /// Price several plans side by side, cheapest first.
    pub fn compare(
        &self,
        request: ComparisonRequest,
    ) -> Result<ComparisonResponse, CoverageServiceError> {
        let ComparisonRequest { plan_ids, profile } = request;
        if plan_ids.len() < RatingDefaults::MIN_COMPARED_PLANS {
            return Err(ValidationError::InsufficientPlans {
                supplied: plan_ids.len(),
            }
            .into());
        }

        let mut distinct: Vec<&PlanId> = Vec::with_capacity(plan_ids.len());
        for id in &plan_ids {
            if !distinct.contains(&id) {
                distinct.push(id);
            }
        }
        if distinct.len() < RatingDefaults::MIN_COMPARED_PLANS {
            return Err(ValidationError::DuplicatePlans {
                supplied: plan_ids.len(),
                distinct: distinct.len(),
            }
            .into());
        }

        let plans = distinct
            .into_iter()
            .map(|id| self.resolve(id))
            .collect::<Result<Vec<_>, _>>()?;

        let comparisons = rating::compare(&plans, &profile)?;
        info!(
            plans = comparisons.len(),
            age = profile.age.years(),
            "compared plan premiums"
        );

        Ok(ComparisonResponse {
            comparisons,
            user_info: profile,
        })
    }

    fn resolve(&self, id: &PlanId) -> Result<InsurancePlanRecord, RepositoryError> {
        self.plans
            .fetch(id)?
            .ok_or_else(|| RepositoryError::NotFound(format!("insurance plan '{id}'")))
    }
}

/// Error raised by the coverage service.
#[derive(Debug, thiserror::Error)]
pub enum CoverageServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CoverageServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoverageServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            CoverageServiceError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            CoverageServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
