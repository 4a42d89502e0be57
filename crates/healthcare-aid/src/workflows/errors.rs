use super::age::Age;

/// Request problems the caller can fix by changing the payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Symptoms are required")]
    MissingSymptoms,
    #[error("Age must be between {min_age} and {max_age} years")]
    AgeOutOfRange { age: Age, min_age: u32, max_age: u32 },
    #[error("At least 2 plans required for comparison")]
    InsufficientPlans { supplied: usize },
    #[error("At least 2 distinct plans required for comparison")]
    DuplicatePlans { supplied: usize, distinct: usize },
}

/// Failures raised by reference-data and history stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
