use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifying fields for one company validation.
///
/// Built once per request. Name is trimmed; both identifiers are trimmed and
/// upper-cased so that format checks and registry comparisons see the same
/// canonical form the caller meant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    company_name: String,
    corporate_id: String,
    tax_id: String,
}

impl ValidationRequest {
    pub fn new(
        company_name: impl AsRef<str>,
        corporate_id: impl AsRef<str>,
        tax_id: impl AsRef<str>,
    ) -> Self {
        Self {
            company_name: company_name.as_ref().trim().to_string(),
            corporate_id: corporate_id.as_ref().trim().to_uppercase(),
            tax_id: tax_id.as_ref().trim().to_uppercase(),
        }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Corporate Identification Number (CIN)
    pub fn corporate_id(&self) -> &str {
        &self.corporate_id
    }

    /// GST Identification Number (GSTIN)
    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }
}

/// Input field a [`FieldError`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CompanyName,
    CorporateId,
    TaxId,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::CompanyName => write!(f, "companyName"),
            Field::CorporateId => write!(f, "corporateId"),
            Field::TaxId => write!(f, "taxId"),
        }
    }
}

/// A structural violation found on one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_normalizes_fields() {
        let request = ValidationRequest::new(
            "  Acme Pvt Ltd ",
            " u72900ka2018ptc123456",
            "29aabct1332l1zu  ",
        );

        assert_eq!(request.company_name(), "Acme Pvt Ltd");
        assert_eq!(request.corporate_id(), "U72900KA2018PTC123456");
        assert_eq!(request.tax_id(), "29AABCT1332L1ZU");
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new(Field::CorporateId, "must be exactly 21 characters");
        assert_eq!(err.to_string(), "corporateId: must be exactly 21 characters");
    }

    #[test]
    fn test_field_serializes_camel_case() {
        let json = serde_json::to_value(Field::TaxId).unwrap();
        assert_eq!(json, serde_json::json!("taxId"));
    }
}
