//! Crate error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that stop a solve before a report can be produced.
///
/// Solver outcomes such as infeasibility are not errors; they are reported
/// through [`SolveStatus`](crate::models::SolveStatus).
#[derive(Debug, Error)]
pub enum CrewError {
    /// The catalog or the parameters are malformed.
    #[error("invalid input data ({} problem(s)): {}", .0.len(), first_message(.0))]
    InvalidData(Vec<ValidationError>),
    /// A model references undefined variables or non-finite numbers.
    #[error("invalid model: {0}")]
    InvalidModel(String),
    /// The optimization engine faulted.
    #[error("solver failure: {0}")]
    Solver(String),
}

fn first_message(errors: &[ValidationError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}

impl CrewError {
    /// Validation errors carried by [`CrewError::InvalidData`].
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidData(errors) => errors,
            _ => &[],
        }
    }
}
