//! Insurance premium rating and plan comparison.

pub mod domain;
pub mod rating;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    ComparisonRequest, ComparisonResponse, Gender, GenderMultipliers, InsurancePlanRecord,
    PlanComparison, PlanId, PlanListing, PlanSummary, PremiumBreakdown, PremiumCalculation,
    PremiumRequest, PremiumResponse, RiskProfile,
};
pub use rating::{age_factor, compare, rate, RatingDefaults};
pub use repository::PlanRepository;
pub use router::coverage_router;
pub use service::{CoverageService, CoverageServiceError};
