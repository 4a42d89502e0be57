use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{debug, warn};

use super::domain::{PredictionMethod, PredictionResult, Severity, SymptomQuery};
use super::matching::{self, MAX_PREDICTIONS};
use super::repository::DiseaseRepository;
use crate::config::PredictionBackend;
use crate::workflows::errors::{RepositoryError, ValidationError};

/// Produces ranked predictions from symptoms, age, and gender.
///
/// The reference table is handed in on every call so implementations stay
/// stateless.
pub trait DiseasePredictor: Send + Sync {
    fn method(&self) -> PredictionMethod;

    fn predict(
        &self,
        query: &SymptomQuery,
        diseases: &dyn DiseaseRepository,
    ) -> Result<Vec<PredictionResult>, PredictorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("failed to launch prediction model '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("prediction model exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("prediction model '{program}' did not answer within {}s", timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },
    #[error("prediction model returned malformed output: {0}")]
    Output(String),
    #[error("No predictions returned from ML model")]
    NoPredictions,
}

/// Build the predictor selected by configuration.
pub fn from_backend(backend: &PredictionBackend) -> Arc<dyn DiseasePredictor> {
    match backend {
        PredictionBackend::SymptomMatch => Arc::new(SymptomMatchPredictor),
        PredictionBackend::External {
            program,
            args,
            timeout,
        } => Arc::new(
            ExternalModelPredictor::new(program.clone(), args.clone()).with_timeout(*timeout),
        ),
    }
}

/// Bidirectional substring matcher over the full reference table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymptomMatchPredictor;

impl DiseasePredictor for SymptomMatchPredictor {
    fn method(&self) -> PredictionMethod {
        PredictionMethod::SymptomMatch
    }

    fn predict(
        &self,
        query: &SymptomQuery,
        diseases: &dyn DiseaseRepository,
    ) -> Result<Vec<PredictionResult>, PredictorError> {
        if query.symptoms.is_empty() {
            return Err(ValidationError::MissingSymptoms.into());
        }
        let records = diseases.all()?;
        Ok(matching::score(&query.symptoms, &records)?)
    }
}

/// Delegates to an out-of-process model.
///
/// The program receives `<symptoms JSON> <age> <gender>` after its configured
/// arguments and must print a JSON array of predictions as its last line.
/// A model still running after the timeout is killed.
#[derive(Debug, Clone)]
pub struct ExternalModelPredictor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

impl ExternalModelPredictor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: PredictionBackend::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn invoke(&self, query: &SymptomQuery) -> Result<String, PredictorError> {
        let symptoms = serde_json::to_string(&query.symptoms)
            .map_err(|err| PredictorError::Output(err.to_string()))?;
        let age = query.age.map(|age| age.to_string()).unwrap_or_default();
        let gender = query.gender.clone().unwrap_or_default();

        debug!(program = %self.program, "invoking external prediction model");
        let spawn_error = |source| PredictorError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(symptoms)
            .arg(age)
            .arg(gender)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + self.timeout;
        let status: ExitStatus = loop {
            if let Some(status) = child.try_wait().map_err(spawn_error)? {
                break status;
            }
            if Instant::now() >= deadline {
                // Readers are left detached; a grandchild may still hold the pipes.
                let _ = child.kill();
                let _ = child.wait();
                warn!(
                    program = %self.program,
                    timeout = ?self.timeout,
                    "external prediction model timed out"
                );
                return Err(PredictorError::Timeout {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(EXIT_POLL_INTERVAL);
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            warn!(%status, %stderr, "external prediction model failed");
            return Err(PredictorError::Exit {
                status: status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

impl DiseasePredictor for ExternalModelPredictor {
    fn method(&self) -> PredictionMethod {
        PredictionMethod::ExternalModel
    }

    fn predict(
        &self,
        query: &SymptomQuery,
        _diseases: &dyn DiseaseRepository,
    ) -> Result<Vec<PredictionResult>, PredictorError> {
        if query.symptoms.iter().all(|symptom| symptom.trim().is_empty()) {
            return Err(ValidationError::MissingSymptoms.into());
        }
        let stdout = self.invoke(query)?;
        parse_model_output(&stdout)
    }
}

fn drain<R>(pipe: Option<R>) -> JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        buffer
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelPrediction {
    disease: String,
    confidence: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    severity: Severity,
    #[serde(default)]
    treatment: String,
    #[serde(default)]
    prevention: String,
    #[serde(default)]
    matching_symptoms: Vec<String>,
}

impl From<ModelPrediction> for PredictionResult {
    fn from(value: ModelPrediction) -> Self {
        PredictionResult {
            disease: value.disease,
            confidence: value.confidence.round().clamp(0.0, 100.0) as u8,
            description: value.description,
            severity: value.severity,
            treatment: value.treatment,
            prevention: value.prevention,
            matching_symptoms: value.matching_symptoms,
        }
    }
}

/// Model scripts may log progress before the payload, so only the last
/// non-empty line is parsed.
pub(crate) fn parse_model_output(stdout: &str) -> Result<Vec<PredictionResult>, PredictorError> {
    let payload = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(PredictorError::NoPredictions)?;

    let parsed: Vec<ModelPrediction> = serde_json::from_str(payload)
        .map_err(|err| PredictorError::Output(err.to_string()))?;

    if parsed.is_empty() {
        return Err(PredictorError::NoPredictions);
    }

    Ok(parsed
        .into_iter()
        .take(MAX_PREDICTIONS)
        .map(PredictionResult::from)
        .collect())
}
