//! Uniform result contract for external source checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Negative reports at or above this count classify a company as a scam
pub const SCAM_REPORT_THRESHOLD: u32 = 7;

/// The four evidence sources consulted for every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceName {
    TaxRegistry,
    CorporateRegistry,
    Reputation,
    Employability,
}

impl SourceName {
    pub const ALL: [SourceName; 4] = [
        SourceName::TaxRegistry,
        SourceName::CorporateRegistry,
        SourceName::Reputation,
        SourceName::Employability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::TaxRegistry => "tax_registry",
            SourceName::CorporateRegistry => "corporate_registry",
            SourceName::Reputation => "reputation",
            SourceName::Employability => "employability",
        }
    }

    /// Human-readable label used in rendered output
    pub fn label(&self) -> &'static str {
        match self {
            SourceName::TaxRegistry => "Tax registry (GST)",
            SourceName::CorporateRegistry => "Corporate registry (MCA)",
            SourceName::Reputation => "Reputation (scam reports)",
            SourceName::Employability => "Employability signals",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed taxonomy of source failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceErrorKind {
    InvalidFormat,
    NotFound,
    NetworkError,
    Timeout,
    ParseError,
    UnknownError,
}

impl fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceErrorKind::InvalidFormat => "INVALID_FORMAT",
            SourceErrorKind::NotFound => "NOT_FOUND",
            SourceErrorKind::NetworkError => "NETWORK_ERROR",
            SourceErrorKind::Timeout => "TIMEOUT",
            SourceErrorKind::ParseError => "PARSE_ERROR",
            SourceErrorKind::UnknownError => "UNKNOWN_ERROR",
        };
        f.write_str(s)
    }
}

/// Failure reported by (or on behalf of) a source check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SourceError {
    pub kind: SourceErrorKind,
    pub message: String,
}

impl SourceError {
    pub fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NetworkError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Timeout, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::ParseError, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::UnknownError, message)
    }
}

/// Verdict of the scam-report classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReputationClass {
    Legit,
    Scam,
    Unknown,
}

/// Reputation payload: classification plus corroborating negative reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationSignal {
    pub classification: ReputationClass,
    #[serde(default)]
    pub negative_reports: u32,
}

impl ReputationSignal {
    /// Classify from the number of negative reports found
    pub fn from_report_count(negative_reports: u32) -> Self {
        let classification = if negative_reports >= SCAM_REPORT_THRESHOLD {
            ReputationClass::Scam
        } else {
            ReputationClass::Legit
        };
        Self {
            classification,
            negative_reports,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployabilityStrength {
    Strong,
    Moderate,
    Weak,
    Unknown,
}

impl EmployabilityStrength {
    /// Strength from the number of positive signals observed
    /// (employee counts, hiring posts, recent activity, positive intern feedback).
    pub fn from_signal_count(signals: usize) -> Self {
        match signals {
            0 => EmployabilityStrength::Unknown,
            1 => EmployabilityStrength::Weak,
            2 => EmployabilityStrength::Moderate,
            _ => EmployabilityStrength::Strong,
        }
    }
}

/// Data returned by a successful source check.
///
/// Scoring and consistency logic only ever branch on the typed fields;
/// `details` is passed through untouched for audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<ReputationSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employability: Option<EmployabilityStrength>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Value>,
}

impl SourcePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_reputation(mut self, signal: ReputationSignal) -> Self {
        self.reputation = Some(signal);
        self
    }

    pub fn with_employability(mut self, strength: EmployabilityStrength) -> Self {
        self.employability = Some(strength);
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Settled outcome of one source check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", content = "data", rename_all = "snake_case")]
pub enum SourceOutcome {
    Found(SourcePayload),
    Failed(SourceError),
}

impl From<Result<SourcePayload, SourceError>> for SourceOutcome {
    fn from(result: Result<SourcePayload, SourceError>) -> Self {
        match result {
            Ok(payload) => SourceOutcome::Found(payload),
            Err(err) => SourceOutcome::Failed(err),
        }
    }
}

/// A source outcome tagged with the source that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    pub source: SourceName,
    pub outcome: SourceOutcome,
}

impl SourceResult {
    pub fn found(source: SourceName, payload: SourcePayload) -> Self {
        Self {
            source,
            outcome: SourceOutcome::Found(payload),
        }
    }

    pub fn failed(source: SourceName, error: SourceError) -> Self {
        Self {
            source,
            outcome: SourceOutcome::Failed(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, SourceOutcome::Found(_))
    }

    pub fn payload(&self) -> Option<&SourcePayload> {
        match &self.outcome {
            SourceOutcome::Found(payload) => Some(payload),
            SourceOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SourceError> {
        match &self.outcome {
            SourceOutcome::Found(_) => None,
            SourceOutcome::Failed(err) => Some(err),
        }
    }
}
