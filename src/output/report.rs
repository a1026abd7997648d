use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FieldError, SourceName, SourceResult, ValidationRequest};
use crate::orchestrator::{FanOutTiming, SourceResults};
use crate::scoring::{Classification, Confidence, Flags, ScoreBreakdown};

/// Final, immutable outcome of one validation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegitimacyReport {
    /// Normalized request echo
    pub request: ValidationRequest,
    pub validated_at: DateTime<Utc>,
    /// Absent when no fan-out ran (invalid input)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<FanOutTiming>,
    pub classification: Classification,
    pub status: String,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    /// Absent (not zero) for invalid input
    #[serde(default)]
    pub total_score: Option<u32>,
    pub max_score: u32,
    #[serde(default)]
    pub breakdown: Option<ScoreBreakdown>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
    /// The four raw source results, unmodified
    #[serde(default)]
    pub detailed_results: BTreeMap<SourceName, SourceResult>,
}

impl LegitimacyReport {
    pub fn is_invalid(&self) -> bool {
        self.classification == Classification::Invalid
    }
}

/// Package a scored request. No decisions are made here.
pub fn assemble(
    request: ValidationRequest,
    breakdown: ScoreBreakdown,
    classification: Classification,
    flags: Flags,
    raw_results: SourceResults,
    timing: FanOutTiming,
) -> LegitimacyReport {
    LegitimacyReport {
        request,
        validated_at: timing.finished_at,
        timing: Some(timing),
        classification,
        status: classification.headline().to_string(),
        confidence: classification.confidence(),
        total_score: Some(breakdown.total_score()),
        max_score: ScoreBreakdown::MAX_TOTAL,
        breakdown: Some(breakdown),
        flags,
        field_errors: Vec::new(),
        detailed_results: raw_results.into_map(),
    }
}

/// Terminal report for a request that failed input validation
pub fn assemble_invalid(request: ValidationRequest, errors: Vec<FieldError>) -> LegitimacyReport {
    LegitimacyReport {
        request,
        validated_at: Utc::now(),
        timing: None,
        classification: Classification::Invalid,
        status: Classification::Invalid.headline().to_string(),
        confidence: None,
        total_score: None,
        max_score: ScoreBreakdown::MAX_TOTAL,
        breakdown: None,
        flags: Flags::default(),
        field_errors: errors,
        detailed_results: BTreeMap::new(),
    }
}
