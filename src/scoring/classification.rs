use serde::{Deserialize, Serialize};
use std::fmt;

/// Legitimacy tier derived from the total score.
///
/// `Invalid` is terminal and only produced when input validation fails,
/// before any source runs. The other four are a pure function of score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Invalid,
    Legitimate,
    LikelyLegitimate,
    Questionable,
    NotLegitimate,
}

impl Classification {
    pub fn from_score(total_score: u32) -> Self {
        match total_score {
            80.. => Classification::Legitimate,
            60..=79 => Classification::LikelyLegitimate,
            40..=59 => Classification::Questionable,
            _ => Classification::NotLegitimate,
        }
    }

    /// Confidence in the tier; `None` for invalid input
    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            Classification::Invalid => None,
            Classification::Legitimate => Some(Confidence::High),
            Classification::LikelyLegitimate => Some(Confidence::Medium),
            Classification::Questionable => Some(Confidence::Low),
            Classification::NotLegitimate => Some(Confidence::High),
        }
    }

    /// One-line human verdict
    pub fn headline(&self) -> &'static str {
        match self {
            Classification::Invalid => "Validation failed: input is invalid",
            Classification::Legitimate => "Company is legitimate",
            Classification::LikelyLegitimate => "Company is likely legitimate (some concerns)",
            Classification::Questionable => "Company legitimacy is questionable",
            Classification::NotLegitimate => "Company is not legitimate",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Invalid => "INVALID",
            Classification::Legitimate => "LEGITIMATE",
            Classification::LikelyLegitimate => "LIKELY_LEGITIMATE",
            Classification::Questionable => "QUESTIONABLE",
            Classification::NotLegitimate => "NOT_LEGITIMATE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "HIGH"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::Low => write!(f, "LOW"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Classification::from_score(100), Classification::Legitimate);
        assert_eq!(Classification::from_score(80), Classification::Legitimate);
        assert_eq!(
            Classification::from_score(79),
            Classification::LikelyLegitimate
        );
        assert_eq!(
            Classification::from_score(60),
            Classification::LikelyLegitimate
        );
        assert_eq!(Classification::from_score(59), Classification::Questionable);
        assert_eq!(Classification::from_score(40), Classification::Questionable);
        assert_eq!(Classification::from_score(39), Classification::NotLegitimate);
        assert_eq!(Classification::from_score(0), Classification::NotLegitimate);
    }

    #[test]
    fn test_confidence_labels() {
        assert_eq!(Classification::Invalid.confidence(), None);
        assert_eq!(
            Classification::Questionable.confidence(),
            Some(Confidence::Low)
        );
        assert_eq!(
            Classification::NotLegitimate.confidence(),
            Some(Confidence::High)
        );
    }

    #[test]
    fn test_serializes_screaming_snake_case() {
        let json = serde_json::to_value(Classification::LikelyLegitimate).unwrap();
        assert_eq!(json, serde_json::json!("LIKELY_LEGITIMATE"));
    }
}
