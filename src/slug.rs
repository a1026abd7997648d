//! Slug and correlation-token utilities.

use chrono::{DateTime, Utc};

/// Maximum length for the company part of a correlation token
const MAX_SLUG_LENGTH: usize = 30;

/// Convert a string to a lowercase, hyphen-separated slug.
///
/// Does NOT truncate - use `slugify_truncate` for length-limited slugs.
pub fn slugify(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive dashes and trim leading/trailing dashes
    let mut result = String::new();
    let mut prev_dash = true;
    for c in slug.chars() {
        if c == '-' {
            if !prev_dash {
                result.push(c);
            }
            prev_dash = true;
        } else {
            result.push(c);
            prev_dash = false;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Slugify, truncating at word boundaries to stay under MAX_SLUG_LENGTH.
pub fn slugify_truncate(text: &str) -> String {
    let mut result = slugify(text);

    if result.len() > MAX_SLUG_LENGTH {
        let cut = floor_char_boundary(&result, MAX_SLUG_LENGTH);
        if let Some(pos) = result[..cut].rfind('-') {
            result.truncate(pos);
        } else {
            result.truncate(cut);
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Token identifying one background validation in logs:
/// `<company-slug>_<YYYYmmdd_HHMMSS>`
pub fn correlation_token(company_name: &str) -> String {
    correlation_token_at(company_name, Utc::now())
}

pub fn correlation_token_at(company_name: &str, at: DateTime<Utc>) -> String {
    let slug = slugify_truncate(company_name);
    let slug = if slug.is_empty() { "company".to_string() } else { slug };
    format!("{}_{}", slug, at.format("%Y%m%d_%H%M%S"))
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Acme Pvt. Ltd."), "acme-pvt-ltd");
        assert_eq!(slugify("Test 123!"), "test-123");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn test_slugify_truncate_long_input() {
        let long_name = "Consolidated Engineering and Infrastructure Services of Southern India Private Limited";
        let slug = slugify_truncate(long_name);
        assert!(slug.len() <= MAX_SLUG_LENGTH);
        assert!(!slug.ends_with('-'));
        assert!(!slug.is_empty());
    }

    #[test]
    fn test_slugify_truncate_short_input() {
        assert_eq!(slugify_truncate("Acme Corp"), "acme-corp");
    }

    #[test]
    fn test_correlation_token_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            correlation_token_at("Acme Pvt Ltd", at),
            "acme-pvt-ltd_20240309_140507"
        );
    }

    #[test]
    fn test_correlation_token_empty_name() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(correlation_token_at("!!!", at), "company_20240101_000000");
    }
}
