//! Request-level error type.
//!
//! Source failures never surface here; they are folded into the report as
//! `SourceOutcome::Failed`. Only conditions that stop a whole request do.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::FieldError;

#[derive(Error, Debug)]
pub enum VetError {
    /// Structural validation failed before any source was contacted
    #[error("Input invalid: {}", join_field_errors(.errors))]
    InvalidInput { errors: Vec<FieldError> },

    /// The caller's overall deadline elapsed; in-flight checks were dropped
    #[error("Validation deadline of {deadline_ms}ms exceeded")]
    DeadlineExceeded { deadline_ms: u64 },

    /// Recorded source file could not be read or parsed
    #[error("Recorded sources error in {path:?}: {message}")]
    Fixture { path: PathBuf, message: String },
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, VetError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    #[test]
    fn test_invalid_input_lists_every_field() {
        let err = VetError::InvalidInput {
            errors: vec![
                FieldError::new(Field::CorporateId, "bad length"),
                FieldError::new(Field::TaxId, "bad pattern"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Input invalid: corporateId: bad length; taxId: bad pattern"
        );
    }
}
