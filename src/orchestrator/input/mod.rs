//! Structural input validation.
//!
//! Runs BEFORE any source is contacted. Every field is checked
//! independently so that a bad request reports all of its problems at once.

mod identifiers;

pub use identifiers::{CIN_LENGTH, GSTIN_LENGTH, matches_cin_pattern, matches_gstin_pattern};

use crate::models::{Field, FieldError, ValidationRequest};

// ============================================================================
// Input Validator
// ============================================================================

/// Pure format checks over a [`ValidationRequest`]
#[derive(Debug, Clone)]
pub struct InputValidator {
    /// Minimum company name length after trimming
    pub min_name_length: usize,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self { min_name_length: 2 }
    }
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all field checks; returns every violation found
    pub fn validate(&self, request: &ValidationRequest) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = [
            self.check_corporate_id(request.corporate_id()),
            self.check_tax_id(request.tax_id()),
            self.check_company_name(request.company_name()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn check_corporate_id(&self, cin: &str) -> Option<FieldError> {
        let len = cin.chars().count();
        if len != CIN_LENGTH {
            return Some(FieldError::new(
                Field::CorporateId,
                format!("must be exactly {} characters (provided: {})", CIN_LENGTH, len),
            ));
        }
        if !matches_cin_pattern(cin) {
            return Some(FieldError::new(
                Field::CorporateId,
                format!("format is invalid: {}", cin),
            ));
        }
        None
    }

    pub fn check_tax_id(&self, gstin: &str) -> Option<FieldError> {
        let len = gstin.chars().count();
        if len != GSTIN_LENGTH {
            return Some(FieldError::new(
                Field::TaxId,
                format!("must be exactly {} characters (provided: {})", GSTIN_LENGTH, len),
            ));
        }
        if !matches_gstin_pattern(gstin) {
            return Some(FieldError::new(
                Field::TaxId,
                format!("format is invalid: {}", gstin),
            ));
        }
        None
    }

    pub fn check_company_name(&self, name: &str) -> Option<FieldError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Some(FieldError::new(Field::CompanyName, "must not be empty"));
        }
        if trimmed.chars().count() < self.min_name_length {
            return Some(FieldError::new(
                Field::CompanyName,
                format!("must be at least {} characters", self.min_name_length),
            ));
        }
        None
    }
}
