use super::domain::{
    InsurancePlanRecord, PlanComparison, PremiumBreakdown, PremiumCalculation, RiskProfile,
};
use crate::workflows::age::Age;
use crate::workflows::errors::ValidationError;

/// Fallback values for rate-table fields a plan leaves unset, and the
/// constants of the derived age factor.
pub struct RatingDefaults;

impl RatingDefaults {
    pub const NEUTRAL_MULTIPLIER: f64 = 1.0;
    pub const MIN_AGE: u32 = 18;
    pub const MAX_AGE: u32 = 65;
    pub const AGE_FACTOR_PIVOT: f64 = 30.0;
    pub const AGE_FACTOR_SLOPE: f64 = 0.02;
    pub const AGE_FACTOR_FLOOR: f64 = 1.0;
    pub const MIN_COMPARED_PLANS: usize = 2;

    pub(crate) fn neutral() -> f64 {
        Self::NEUTRAL_MULTIPLIER
    }

    pub(crate) fn min_age() -> u32 {
        Self::MIN_AGE
    }

    pub(crate) fn max_age() -> u32 {
        Self::MAX_AGE
    }
}

/// `max(1, (age - 30) * 0.02)`, applied on top of the plan's own age multiplier.
pub fn age_factor(age: Age) -> f64 {
    let scaled = (age.years() - RatingDefaults::AGE_FACTOR_PIVOT) * RatingDefaults::AGE_FACTOR_SLOPE;
    scaled.max(RatingDefaults::AGE_FACTOR_FLOOR)
}

struct Composition {
    premium: f64,
    age_factor: f64,
    gender_multiplier: f64,
    medical_condition_multiplier: f64,
}

fn compose(plan: &InsurancePlanRecord, profile: &RiskProfile) -> Composition {
    let mut premium = plan.base_premium;
    premium *= plan.age_multiplier;

    let gender_multiplier = plan.gender_multiplier.for_key(&profile.gender);
    premium *= gender_multiplier;

    let medical_condition_multiplier = if profile.medical_conditions.is_empty() {
        RatingDefaults::NEUTRAL_MULTIPLIER
    } else {
        plan.medical_condition_multiplier
    };
    premium *= medical_condition_multiplier;

    let age_factor = age_factor(profile.age);
    premium *= age_factor;

    Composition {
        premium,
        age_factor,
        gender_multiplier,
        medical_condition_multiplier,
    }
}

fn round_premium(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Quote a single plan, rejecting ages outside the plan's range.
pub fn rate(
    plan: &InsurancePlanRecord,
    profile: &RiskProfile,
) -> Result<PremiumCalculation, ValidationError> {
    if !profile.age.within(plan.min_age, plan.max_age) {
        return Err(ValidationError::AgeOutOfRange {
            age: profile.age,
            min_age: plan.min_age,
            max_age: plan.max_age,
        });
    }

    let composed = compose(plan, profile);

    Ok(PremiumCalculation {
        plan: plan.summary(),
        calculation: PremiumBreakdown {
            base_premium: plan.base_premium,
            age_factor: round_cents(composed.age_factor),
            gender_multiplier: composed.gender_multiplier,
            medical_condition_multiplier: composed.medical_condition_multiplier,
            final_premium: round_premium(composed.premium),
        },
    })
}

/// Price every plan for the same applicant, cheapest first.
///
/// Plans are not checked against their own age range here; single-plan
/// quoting is the only path that enforces it.
pub fn compare(
    plans: &[InsurancePlanRecord],
    profile: &RiskProfile,
) -> Result<Vec<PlanComparison>, ValidationError> {
    if plans.len() < RatingDefaults::MIN_COMPARED_PLANS {
        return Err(ValidationError::InsufficientPlans {
            supplied: plans.len(),
        });
    }

    let mut comparisons: Vec<PlanComparison> = plans
        .iter()
        .map(|plan| {
            let premium = round_premium(compose(plan, profile).premium);
            PlanComparison {
                plan: plan.summary(),
                premium,
                monthly_premium: round_premium(premium as f64 / 12.0),
            }
        })
        .collect();

    comparisons.sort_by_key(|comparison| comparison.premium);
    Ok(comparisons)
}
