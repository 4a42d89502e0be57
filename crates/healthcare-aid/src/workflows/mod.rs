pub mod age;
pub mod coverage;
pub mod diagnosis;
pub mod errors;
pub mod reference;

#[cfg(test)]
mod tests;

pub use age::Age;
pub use errors::{RepositoryError, ValidationError};
