use super::domain::{DiseaseRecord, PredictionResult};
use crate::workflows::errors::ValidationError;

/// Upper bound on ranked candidates returned for one query.
pub const MAX_PREDICTIONS: usize = 5;

/// Two symptoms match when either is a case-insensitive substring of the other.
pub fn symptoms_match(declared: &str, reported: &str) -> bool {
    let declared = declared.to_lowercase();
    let reported = reported.to_lowercase();
    declared.contains(&reported) || reported.contains(&declared)
}

/// Rank `diseases` against the reported symptoms.
///
/// Confidence is the share of the disease's own symptom list that matched, so
/// short symptom lists saturate quickly. Diseases with no match are dropped,
/// ties keep reference order, and at most [`MAX_PREDICTIONS`] are returned.
pub fn score(
    user_symptoms: &[String],
    diseases: &[DiseaseRecord],
) -> Result<Vec<PredictionResult>, ValidationError> {
    let reported = normalized_symptoms(user_symptoms)?;

    let mut predictions: Vec<PredictionResult> = diseases
        .iter()
        .filter_map(|disease| score_disease(&reported, disease))
        .collect();

    // `sort_by` is stable, so equal confidences stay in load order.
    predictions.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    predictions.truncate(MAX_PREDICTIONS);
    Ok(predictions)
}

fn normalized_symptoms(user_symptoms: &[String]) -> Result<Vec<String>, ValidationError> {
    let reported: Vec<String> = user_symptoms
        .iter()
        .filter(|symptom| !symptom.trim().is_empty())
        .map(|symptom| symptom.to_lowercase())
        .collect();

    if reported.is_empty() {
        return Err(ValidationError::MissingSymptoms);
    }
    Ok(reported)
}

fn score_disease(reported: &[String], disease: &DiseaseRecord) -> Option<PredictionResult> {
    if disease.symptoms.is_empty() {
        return None;
    }

    let matching_symptoms: Vec<String> = disease
        .symptoms
        .iter()
        .filter(|declared| reported.iter().any(|user| symptoms_match(declared, user)))
        .cloned()
        .collect();

    if matching_symptoms.is_empty() {
        return None;
    }

    Some(PredictionResult {
        disease: disease.name.clone(),
        confidence: confidence(matching_symptoms.len(), disease.symptoms.len()),
        description: disease.description.clone(),
        severity: disease.severity,
        treatment: disease.treatment.clone(),
        prevention: disease.prevention.clone(),
        matching_symptoms,
    })
}

fn confidence(matched: usize, declared: usize) -> u8 {
    let ratio = matched as f64 / declared as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::diagnosis::domain::{AgeGroup, GenderPreference, Severity};

    fn disease(name: &str, symptoms: &[&str]) -> DiseaseRecord {
        DiseaseRecord {
            name: name.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            description: format!("{name} description"),
            severity: Severity::Medium,
            treatment: "rest".to_string(),
            prevention: "hygiene".to_string(),
            risk_factors: Vec::new(),
            age_group: AgeGroup::All,
            gender_preference: GenderPreference::None,
        }
    }

    fn symptoms(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn substring_match_runs_both_directions() {
        assert!(symptoms_match("sore throat", "throat"));
        assert!(symptoms_match("fever", "mild fever since monday"));
        assert!(symptoms_match("Chest Pain", "CHEST"));
        assert!(symptoms_match("cough", "coughing fit"));
        assert!(!symptoms_match("nausea", "headache"));
    }

    #[test]
    fn confidence_uses_disease_symptom_count() {
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

        let predictions = score(&symptoms(&["fever", "cough"]), &[cold]).expect("scores");

        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].confidence, 29);
        assert_eq!(predictions[0].matching_symptoms, symptoms(&["fever", "cough"]));
    }

    #[test]
    fn single_symptom_disease_reaches_full_confidence() {
        let rash = disease("Rash", &["itching"]);
        let predictions = score(&symptoms(&["Itching"]), &[rash]).expect("scores");
        assert_eq!(predictions[0].confidence, 100);
    }

    #[test]
    fn unmatched_diseases_are_excluded() {
        let diseases = vec![
            disease("Migraine", &["severe headache", "nausea"]),
            disease("Asthma", &["wheezing", "shortness of breath"]),
        ];

        let predictions = score(&symptoms(&["wheezing"]), &diseases).expect("scores");

        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].disease, "Asthma");
    }

    #[test]
    fn no_match_yields_empty_list() {
        let diseases = vec![disease("Migraine", &["severe headache", "nausea"])];
        let predictions = score(&symptoms(&["itchy elbow"]), &diseases).expect("scores");
        assert!(predictions.is_empty());
    }

    #[test]
    fn empty_or_blank_symptoms_are_rejected() {
        let diseases = vec![disease("Migraine", &["nausea"])];
        assert_eq!(
            score(&[], &diseases),
            Err(ValidationError::MissingSymptoms)
        );
        assert_eq!(
            score(&symptoms(&["  ", ""]), &diseases),
            Err(ValidationError::MissingSymptoms)
        );
    }

    #[test]
    fn padded_symptoms_match_verbatim() {
        let diseases = vec![disease("Strep", &["sore throat", "cough"])];

        let padded = score(&symptoms(&["throat "]), &diseases).expect("scores");
        assert!(padded.is_empty());

        let exact = score(&symptoms(&["throat"]), &diseases).expect("scores");
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].matching_symptoms, symptoms(&["sore throat"]));
    }

    #[test]
    fn ranks_by_confidence_and_keeps_load_order_on_ties() {
        let diseases = vec![
            disease("First", &["fever", "a", "b", "c"]),
            disease("Second", &["fever", "x"]),
            disease("Third", &["fever", "y", "z", "w"]),
        ];

        let predictions = score(&symptoms(&["fever"]), &diseases).expect("scores");
        let names: Vec<&str> = predictions.iter().map(|p| p.disease.as_str()).collect();

        assert_eq!(names, vec!["Second", "First", "Third"]);
        assert_eq!(predictions[0].confidence, 50);
        assert_eq!(predictions[1].confidence, 25);
    }

    #[test]
    fn truncates_to_five_results() {
        let diseases: Vec<DiseaseRecord> = (0..8)
            .map(|idx| disease(&format!("Disease {idx}"), &["fatigue", "other"]))
            .collect();

        let predictions = score(&symptoms(&["fatigue"]), &diseases).expect("scores");

        assert_eq!(predictions.len(), MAX_PREDICTIONS);
        assert_eq!(predictions[0].disease, "Disease 0");
        assert_eq!(predictions[4].disease, "Disease 4");
    }

    #[test]
    fn records_are_left_untouched() {
        let diseases = vec![disease("Flu", &["Fever", "Chills"])];
        let before = diseases.clone();
        let _ = score(&symptoms(&["fever"]), &diseases).expect("scores");
        assert_eq!(diseases, before);
    }
}
