//! Structural formats of the two registry identifiers.
//!
//! - CIN (21): listing `L|U`, 5-digit industry code, 2-letter state,
//!   4-digit incorporation year, 3-letter ownership type, 6-digit sequence
//! - GSTIN (15): 2-digit state code, 10-char PAN, entity number `1-9A-Z`,
//!   literal `Z`, check character

use once_cell::sync::Lazy;
use regex::Regex;

pub const CIN_LENGTH: usize = 21;
pub const GSTIN_LENGTH: usize = 15;

static CIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[LU][0-9]{5}[A-Z]{2}[0-9]{4}[A-Z]{3}[0-9]{6}$")
        .expect("invalid CIN_PATTERN regex")
});

static GSTIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$")
        .expect("invalid GSTIN_PATTERN regex")
});

pub fn matches_cin_pattern(cin: &str) -> bool {
    CIN_PATTERN.is_match(cin)
}

pub fn matches_gstin_pattern(gstin: &str) -> bool {
    GSTIN_PATTERN.is_match(gstin)
}
