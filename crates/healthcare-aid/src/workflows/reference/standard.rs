use crate::workflows::coverage::{GenderMultipliers, InsurancePlanRecord, PlanId};
use crate::workflows::diagnosis::{AgeGroup, DiseaseRecord, GenderPreference, Severity};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn disease(
    name: &str,
    symptoms: &[&str],
    description: &str,
    severity: Severity,
    treatment: &str,
    prevention: &str,
    risk_factors: &[&str],
    age_group: AgeGroup,
    gender_preference: GenderPreference,
) -> DiseaseRecord {
    DiseaseRecord {
        name: name.to_string(),
        symptoms: strings(symptoms),
        description: description.to_string(),
        severity,
        treatment: treatment.to_string(),
        prevention: prevention.to_string(),
        risk_factors: strings(risk_factors),
        age_group,
        gender_preference,
    }
}

pub(super) fn diseases() -> Vec<DiseaseRecord> {
    vec![
        disease(
            "Common Cold",
            &["fever", "cough", "sore throat", "runny nose", "congestion", "sneezing", "fatigue"],
            "A viral infection of the upper respiratory tract causing mild symptoms",
            Severity::Low,
            "Rest, fluids, over-the-counter medications, symptom management",
            "Wash hands frequently, avoid close contact, maintain good hygiene",
            &["Weakened immune system", "Close contact with infected individuals"],
            AgeGroup::All,
            GenderPreference::None,
        ),
        disease(
            "Influenza",
            &["fever", "cough", "sore throat", "body aches", "fatigue", "headache", "chills"],
            "A contagious respiratory illness caused by influenza viruses with severe symptoms",
            Severity::Medium,
            "Rest, fluids, antiviral medications, fever management",
            "Annual flu vaccine, good hygiene, avoid sick people",
            &["Weakened immune system", "Age", "Chronic conditions"],
            AgeGroup::All,
            GenderPreference::None,
        ),
        disease(
            "Pneumonia",
            &["fever", "cough", "difficulty breathing", "chest pain", "fatigue", "sweating"],
            "Infection that inflames the air sacs in one or both lungs, can be life-threatening",
            Severity::High,
            "Antibiotics, hospitalization if severe, oxygen therapy",
            "Pneumococcal vaccine, good hygiene, quit smoking",
            &["Age", "Smoking", "Chronic lung disease"],
            AgeGroup::Elderly,
            GenderPreference::None,
        ),
        disease(
            "Diabetes Type 2",
            &[
                "frequent urination",
                "excessive thirst",
                "hunger",
                "fatigue",
                "blurred vision",
                "slow healing",
            ],
            "Metabolic disorder where the body becomes resistant to insulin",
            Severity::High,
            "Oral medications, diet, exercise, blood sugar monitoring",
            "Healthy diet, regular exercise, maintain healthy weight",
            &["Obesity", "Family history", "Sedentary lifestyle"],
            AgeGroup::Adult,
            GenderPreference::None,
        ),
        disease(
            "Hypertension",
            &["headache", "shortness of breath", "nosebleeds", "chest pain", "dizziness"],
            "High blood pressure that can lead to serious cardiovascular complications",
            Severity::High,
            "Lifestyle changes, medication, regular blood pressure monitoring",
            "Reduce salt intake, exercise, maintain healthy weight",
            &["High salt intake", "Obesity", "Stress", "Age"],
            AgeGroup::Adult,
            GenderPreference::None,
        ),
        disease(
            "Asthma",
            &[
                "wheezing",
                "shortness of breath",
                "chest tightness",
                "coughing",
                "rapid breathing",
            ],
            "A chronic condition that affects the airways in the lungs, causing breathing problems",
            Severity::Medium,
            "Inhalers, avoiding triggers, long-term control medications",
            "Avoid triggers, take prescribed medications, regular check-ups",
            &["Allergies", "Family history", "Environmental factors"],
            AgeGroup::All,
            GenderPreference::None,
        ),
        disease(
            "Migraine",
            &["severe headache", "nausea", "sensitivity to light", "vomiting", "dizziness"],
            "A neurological condition characterized by severe, recurring headaches",
            Severity::Medium,
            "Pain relievers, rest in dark room, preventive medications",
            "Identify triggers, maintain regular sleep, stress management",
            &["Family history", "Stress", "Hormonal changes"],
            AgeGroup::Adult,
            GenderPreference::Female,
        ),
        disease(
            "Appendicitis",
            &[
                "abdominal pain",
                "nausea",
                "vomiting",
                "loss of appetite",
                "fever",
                "constipation",
            ],
            "Inflammation of the appendix requiring emergency surgical removal",
            Severity::Critical,
            "Emergency surgery (appendectomy), antibiotics",
            "No known prevention, seek immediate medical attention",
            &["Age", "Family history"],
            AgeGroup::Child,
            GenderPreference::None,
        ),
    ]
}

struct PlanSeed {
    id: &'static str,
    provider: &'static str,
    plan_name: &'static str,
    base_premium: f64,
    coverage: &'static str,
    age_multiplier: f64,
    gender_multiplier: GenderMultipliers,
    medical_condition_multiplier: f64,
    min_age: u32,
    max_age: u32,
    description: &'static str,
    features: &'static [&'static str],
    exclusions: &'static [&'static str],
}

impl From<PlanSeed> for InsurancePlanRecord {
    fn from(seed: PlanSeed) -> Self {
        InsurancePlanRecord {
            id: PlanId(seed.id.to_string()),
            provider: seed.provider.to_string(),
            plan_name: seed.plan_name.to_string(),
            base_premium: seed.base_premium,
            coverage: seed.coverage.to_string(),
            age_multiplier: seed.age_multiplier,
            gender_multiplier: seed.gender_multiplier,
            medical_condition_multiplier: seed.medical_condition_multiplier,
            min_age: seed.min_age,
            max_age: seed.max_age,
            description: seed.description.to_string(),
            features: strings(seed.features),
            exclusions: strings(seed.exclusions),
        }
    }
}

pub(super) fn plans() -> Vec<InsurancePlanRecord> {
    vec![
        PlanSeed {
            id: "basic-health",
            provider: "HealthFirst Insurance",
            plan_name: "Basic Health Plan",
            base_premium: 3000.0,
            coverage: "Basic medical coverage including doctor visits and prescription drugs",
            age_multiplier: 1.0,
            gender_multiplier: GenderMultipliers {
                male: 1.1,
                female: 1.0,
                other: 1.05,
            },
            medical_condition_multiplier: 1.3,
            min_age: 18,
            max_age: 65,
            description: "Affordable basic health coverage for individuals and families",
            features: &[
                "Doctor visits",
                "Prescription drugs",
                "Emergency room visits",
                "Preventive care",
            ],
            exclusions: &[
                "Cosmetic procedures",
                "Experimental treatments",
                "Dental care",
                "Vision care",
            ],
        },
        PlanSeed {
            id: "comprehensive-health",
            provider: "PremiumCare Plus",
            plan_name: "Comprehensive Health Plan",
            base_premium: 5000.0,
            coverage: "Comprehensive medical coverage including specialist visits, surgery, and mental health",
            age_multiplier: 1.0,
            gender_multiplier: GenderMultipliers {
                male: 1.05,
                female: 1.0,
                other: 1.025,
            },
            medical_condition_multiplier: 1.2,
            min_age: 18,
            max_age: 70,
            description: "Comprehensive health coverage with extensive benefits",
            features: &[
                "All basic features",
                "Specialist visits",
                "Surgery coverage",
                "Mental health services",
                "Physical therapy",
                "Laboratory tests",
            ],
            exclusions: &["Cosmetic procedures", "Experimental treatments"],
        },
        PlanSeed {
            id: "senior-care",
            provider: "SeniorHealth",
            plan_name: "Senior Care Plan",
            base_premium: 4000.0,
            coverage: "Specialized coverage for seniors including long-term care and prescription drugs",
            age_multiplier: 1.2,
            gender_multiplier: GenderMultipliers {
                male: 1.1,
                female: 1.0,
                other: 1.05,
            },
            medical_condition_multiplier: 1.1,
            min_age: 55,
            max_age: 85,
            description: "Specialized health coverage designed for seniors",
            features: &[
                "All comprehensive features",
                "Long-term care",
                "Home health services",
                "Medical equipment",
                "Vision care",
                "Dental care",
            ],
            exclusions: &["Cosmetic procedures", "Experimental treatments"],
        },
        PlanSeed {
            id: "family-wellness",
            provider: "FamilyHealth",
            plan_name: "Family Wellness Plan",
            base_premium: 3500.0,
            coverage: "Family-focused coverage including pediatric care and maternity benefits",
            age_multiplier: 0.9,
            gender_multiplier: GenderMultipliers {
                male: 1.0,
                female: 1.05,
                other: 1.025,
            },
            medical_condition_multiplier: 1.15,
            min_age: 18,
            max_age: 60,
            description: "Family-oriented health coverage with pediatric and maternity benefits",
            features: &[
                "All basic features",
                "Pediatric care",
                "Maternity benefits",
                "Wellness programs",
                "Vaccinations",
                "Preventive screenings",
            ],
            exclusions: &[
                "Cosmetic procedures",
                "Experimental treatments",
                "Fertility treatments",
            ],
        },
    ]
    .into_iter()
    .map(InsurancePlanRecord::from)
    .collect()
}
