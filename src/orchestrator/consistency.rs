//! Cross-check of registry-returned identifiers against the request.
//!
//! Guards against the corporate registry answering a fuzzy name search with a
//! near-match record that belongs to a different company.

use crate::models::SourceResult;

/// True only when the registry found a record whose identifier equals the
/// requested CIN after trimming and case normalization.
pub fn check_identifier_consistency(registry: &SourceResult, requested_corporate_id: &str) -> bool {
    let Some(identifier) = registry.payload().and_then(|p| p.identifier.as_deref()) else {
        return false;
    };

    let returned = identifier.trim();
    let requested = requested_corporate_id.trim();

    !returned.is_empty() && returned.eq_ignore_ascii_case(requested)
}
