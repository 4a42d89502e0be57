//! Advisory engines for the healthcare aid service: symptom-based disease
//! ranking and insurance premium rating, plus the HTTP surface around them.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
