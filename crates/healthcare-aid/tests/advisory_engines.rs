//! Scenario checks for the scoring and rating engines through the public API.

use healthcare_aid::workflows::coverage::{
    compare, rate, GenderMultipliers, InsurancePlanRecord, PlanId, RiskProfile,
};
use healthcare_aid::workflows::diagnosis::{
    score, AgeGroup, DiseaseRecord, GenderPreference, Severity, MAX_PREDICTIONS,
};
use healthcare_aid::workflows::reference::ReferenceCatalog;
use healthcare_aid::workflows::{Age, ValidationError};

fn disease(name: &str, symptoms: &[&str]) -> DiseaseRecord {
    DiseaseRecord {
        name: name.to_string(),
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        description: "reference entry".to_string(),
        severity: Severity::Low,
        treatment: "rest".to_string(),
        prevention: "hygiene".to_string(),
        risk_factors: Vec::new(),
        age_group: AgeGroup::All,
        gender_preference: GenderPreference::None,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn basic_plan() -> InsurancePlanRecord {
    InsurancePlanRecord {
        id: PlanId("basic".to_string()),
        provider: "HealthFirst Insurance".to_string(),
        plan_name: "Basic Health Plan".to_string(),
        base_premium: 3000.0,
        coverage: "Basic".to_string(),
        age_multiplier: 1.0,
        gender_multiplier: GenderMultipliers {
            male: 1.1,
            ..GenderMultipliers::default()
        },
        medical_condition_multiplier: 1.3,
        min_age: 18,
        max_age: 65,
        description: "Basic coverage".to_string(),
        features: Vec::new(),
        exclusions: Vec::new(),
    }
}

fn applicant(age: u32, gender: &str, conditions: &[&str]) -> RiskProfile {
    RiskProfile {
        age: Age::from(age),
        gender: gender.to_string(),
        medical_conditions: strings(conditions),
    }
}

#[test]
fn two_of_seven_symptoms_scores_twenty_nine() {
    let cold = disease(
        "Common Cold",
        &[
            "fever",
            "cough",
            "sore throat",
            "runny nose",
            "congestion",
            "sneezing",
            "fatigue",
        ],
    );

    let predictions = score(&strings(&["fever", "cough"]), &[cold]).expect("scores");

    assert_eq!(predictions[0].confidence, 29);
}

#[test]
fn standard_catalog_results_are_bounded_and_ordered() {
    let catalog = ReferenceCatalog::standard();
    let queries: [&[&str]; 4] = [
        &["fever"],
        &["fatigue", "headache", "nausea"],
        &["Chest Pain", "shortness of breath"],
        &["pain"],
    ];

    for query in queries {
        let predictions = score(&strings(query), &catalog.diseases).expect("scores");

        assert!(predictions.len() <= MAX_PREDICTIONS);
        assert!(predictions
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence));
        for prediction in &predictions {
            let record = catalog
                .disease(&prediction.disease)
                .expect("prediction names a catalog disease");
            let expected = (100.0 * prediction.matching_symptoms.len() as f64
                / record.symptoms.len() as f64)
                .round() as u8;
            assert!(!prediction.matching_symptoms.is_empty());
            assert_eq!(prediction.confidence, expected);
        }
    }
}

#[test]
fn single_plan_example_quotes_4290() {
    let quote = rate(&basic_plan(), &applicant(40, "male", &["Diabetes"])).expect("quotes");
    assert_eq!(quote.calculation.final_premium, 4290);
}

#[test]
fn underage_applicant_names_valid_range() {
    let err = rate(&basic_plan(), &applicant(15, "male", &[])).expect_err("too young");
    assert_eq!(
        err,
        ValidationError::AgeOutOfRange {
            age: Age::from(15),
            min_age: 18,
            max_age: 65
        }
    );
    assert!(err.to_string().contains("18 and 65"));
}

#[test]
fn every_in_range_age_quotes_non_negative() {
    let plan = basic_plan();
    for age in plan.min_age..=plan.max_age {
        let quote = rate(&plan, &applicant(age, "female", &[])).expect("in range");
        assert!(quote.calculation.final_premium >= 3000);
    }
}

#[test]
fn comparison_example_orders_cheaper_plan_first() {
    let mut pricier = basic_plan();
    pricier.id = PlanId("pricier".to_string());
    pricier.base_premium = 4000.0;
    pricier.gender_multiplier = GenderMultipliers::default();

    let mut cheaper = basic_plan();
    cheaper.id = PlanId("cheaper".to_string());
    cheaper.base_premium = 3500.0;
    cheaper.gender_multiplier = GenderMultipliers::default();

    let comparisons = compare(&[pricier, cheaper], &applicant(30, "male", &[])).expect("compares");

    let summary: Vec<(&str, u64, u64)> = comparisons
        .iter()
        .map(|c| (c.plan.id.0.as_str(), c.premium, c.monthly_premium))
        .collect();
    assert_eq!(summary, vec![("cheaper", 3500, 292), ("pricier", 4000, 333)]);
}
