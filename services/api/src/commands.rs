use crate::infra::{load_catalog, InMemoryPredictionHistory, InMemoryReferenceStore};
use clap::Args;
use healthcare_aid::config::AppConfig;
use healthcare_aid::error::AppError;
use healthcare_aid::workflows::Age;
use healthcare_aid::workflows::coverage::{
    ComparisonRequest, CoverageService, PlanId, PremiumRequest, RiskProfile,
};
use healthcare_aid::workflows::diagnosis::{
    self, DiagnosisService, PredictionRequest, SymptomQuery, UserId,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Reported symptom; repeat for each symptom
    #[arg(long = "symptom", required = true)]
    pub(crate) symptoms: Vec<String>,
    /// Applicant age, echoed back and passed to external models
    #[arg(long)]
    pub(crate) age: Option<f64>,
    /// Applicant gender, echoed back and passed to external models
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Record the top prediction under this user id
    #[arg(long)]
    pub(crate) user: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicantArgs {
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: f64,
    /// Gender key used for the plan's gender multiplier (male, female, other)
    #[arg(long, default_value = "")]
    pub(crate) gender: String,
    /// Declared medical condition; repeat for each condition
    #[arg(long = "condition")]
    pub(crate) conditions: Vec<String>,
}

impl ApplicantArgs {
    fn profile(self) -> RiskProfile {
        RiskProfile {
            age: Age::from(self.age),
            gender: self.gender,
            medical_conditions: self.conditions,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PremiumArgs {
    /// Plan identifier from the reference catalog
    #[arg(long)]
    pub(crate) plan: String,
    #[command(flatten)]
    pub(crate) applicant: ApplicantArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Plan identifier; repeat for each plan to compare
    #[arg(long = "plan")]
    pub(crate) plans: Vec<String>,
    #[command(flatten)]
    pub(crate) applicant: ApplicantArgs,
}

fn reference_store(config: &AppConfig) -> Result<Arc<InMemoryReferenceStore>, AppError> {
    Ok(Arc::new(InMemoryReferenceStore::new(load_catalog(
        &config.reference,
    )?)))
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = DiagnosisService::new(
        reference_store(&config)?,
        Arc::new(InMemoryPredictionHistory::default()),
        diagnosis::from_backend(&config.prediction.backend),
    );

    let response = service.predict(PredictionRequest {
        query: SymptomQuery {
            symptoms: args.symptoms,
            age: args.age.map(Age::from),
            gender: args.gender,
        },
        user_id: args.user.map(UserId),
    })?;

    println!(
        "Disease candidates for: {} ({:?})",
        response.symptoms.join(", "),
        response.method
    );
    if response.predictions.is_empty() {
        println!("- no disease in the reference catalog matched");
        return Ok(());
    }
    for (rank, prediction) in response.predictions.iter().enumerate() {
        println!(
            "{}. {} | {}% confidence | severity {}",
            rank + 1,
            prediction.disease,
            prediction.confidence,
            prediction.severity.label()
        );
        if !prediction.matching_symptoms.is_empty() {
            println!("   matched: {}", prediction.matching_symptoms.join(", "));
        }
        println!("   treatment: {}", prediction.treatment);
    }

    Ok(())
}

pub(crate) fn run_premium(args: PremiumArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = CoverageService::new(reference_store(&config)?);

    let response = service.calculate(PremiumRequest {
        plan_id: PlanId(args.plan),
        profile: args.applicant.profile(),
    })?;

    let plan = &response.quote.plan;
    let calculation = &response.quote.calculation;
    println!("{} ({})", plan.plan_name, plan.provider);
    println!("- base premium: {:.2}", calculation.base_premium);
    println!("- gender multiplier: {}", calculation.gender_multiplier);
    println!(
        "- medical condition multiplier: {}",
        calculation.medical_condition_multiplier
    );
    println!("- age factor: {:.2}", calculation.age_factor);
    println!("- annual premium: {}", calculation.final_premium);

    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = CoverageService::new(reference_store(&config)?);

    let response = service.compare(ComparisonRequest {
        plan_ids: args.plans.into_iter().map(PlanId).collect(),
        profile: args.applicant.profile(),
    })?;

    println!(
        "Plan comparison for age {} ({} declared conditions)",
        response.user_info.age,
        response.user_info.medical_conditions.len()
    );
    for comparison in &response.comparisons {
        println!(
            "- {} [{}]: {} / year | {} / month",
            comparison.plan.plan_name,
            comparison.plan.id,
            comparison.premium,
            comparison.monthly_premium
        );
    }

    Ok(())
}

pub(crate) fn run_plans() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = CoverageService::new(reference_store(&config)?);

    for plan in service.plans()? {
        println!(
            "- {} [{}] by {}: base {:.2}",
            plan.plan_name, plan.id, plan.provider, plan.base_premium
        );
        println!("  {}", plan.coverage);
    }

    Ok(())
}
