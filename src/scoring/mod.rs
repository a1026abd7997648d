//! Deterministic weighted scoring of settled source results.
//!
//! Every rule contributes a fixed number of points and exactly one flag.
//! Absence of evidence (a failed or empty reputation/employability source)
//! earns a neutral constant and never a red flag: missing data is not
//! negative data.
//!
//! | Criterion                | Max | Rule                                       |
//! |--------------------------|-----|--------------------------------------------|
//! | GST registration         | 20  | tax registry found                         |
//! | GST status               | 10  | status equals "active" (case-insensitive)  |
//! | MCA registration         | 20  | corporate registry found                   |
//! | MCA company status       | 10  | status contains "active"                   |
//! | CIN consistency          | 10  | registry CIN matches requested CIN         |
//! | Reputation               | 20  | LEGIT 20, SCAM 0, otherwise 10             |
//! | Employability            | 10  | STRONG 10, MODERATE 7, WEAK 4, otherwise 5 |

mod classification;
mod types;

pub use classification::{Classification, Confidence};
pub use types::{Criterion, Flag, Flags, ScoreBreakdown};

use tracing::debug;

use crate::models::{EmployabilityStrength, ReputationClass, SourceResult};

pub const NEUTRAL_REPUTATION_POINTS: u32 = 10;
pub const NEUTRAL_EMPLOYABILITY_POINTS: u32 = 5;

/// Breakdown plus the flags explaining it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub breakdown: ScoreBreakdown,
    pub flags: Flags,
}

impl ScoreOutcome {
    pub fn total_score(&self) -> u32 {
        self.breakdown.total_score()
    }

    pub fn classification(&self) -> Classification {
        Classification::from_score(self.total_score())
    }
}

/// Stateless rule evaluator
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(
        &self,
        tax: &SourceResult,
        registry: &SourceResult,
        consistency_ok: bool,
        reputation: &SourceResult,
        employability: &SourceResult,
    ) -> ScoreOutcome {
        let rules = [
            (Criterion::TaxValidity, tax_validity(tax)),
            (Criterion::TaxStatus, tax_status(tax)),
            (Criterion::RegistryValidity, registry_validity(registry)),
            (Criterion::RegistryStatus, registry_status(registry)),
            (
                Criterion::IdentifierConsistency,
                identifier_consistency(consistency_ok),
            ),
            (Criterion::Reputation, reputation_rule(reputation)),
            (Criterion::Employability, employability_rule(employability)),
        ];

        let mut breakdown = ScoreBreakdown::default();
        let mut flags = Flags::default();
        for (criterion, (points, flag)) in rules {
            debug!(criterion = ?criterion, points, "Scored criterion");
            breakdown.set(criterion, points);
            flags.push(flag);
        }

        ScoreOutcome { breakdown, flags }
    }
}

// ============================================================================
// Rules
// ============================================================================

fn tax_validity(tax: &SourceResult) -> (u32, Flag) {
    match tax.error() {
        None => (20, Flag::Green("GST number is valid and registered".into())),
        Some(err) => (
            0,
            Flag::Red(format!(
                "GST validation failed or number not found ({})",
                err.kind
            )),
        ),
    }
}

fn tax_status(tax: &SourceResult) -> (u32, Flag) {
    let Some(payload) = tax.payload() else {
        return (0, Flag::Red("GST status could not be verified".into()));
    };

    // Raw comparison: surrounding whitespace is not forgiven
    match payload.status.as_deref() {
        Some(status) if status.eq_ignore_ascii_case("active") => {
            (10, Flag::Green("GST status is Active".into()))
        }
        Some(status) if !status.trim().is_empty() => {
            (0, Flag::Red(format!("GST status is {}", status.trim())))
        }
        _ => (0, Flag::Red("GST status is Unknown".into())),
    }
}

fn registry_validity(registry: &SourceResult) -> (u32, Flag) {
    match registry.error() {
        None => (
            20,
            Flag::Green("CIN number is valid and company is registered".into()),
        ),
        Some(err) => (
            0,
            Flag::Red(format!("MCA validation failed or CIN not found ({})", err.kind)),
        ),
    }
}

fn registry_status(registry: &SourceResult) -> (u32, Flag) {
    let Some(payload) = registry.payload() else {
        return (0, Flag::Red("Company status could not be verified".into()));
    };

    match payload.status.as_deref().map(str::trim) {
        // Substring match, so "Inactive" also passes; the flag names the real status
        Some(status) if status.to_lowercase().contains("active") => {
            (10, Flag::Green(format!("Company status is {}", status)))
        }
        Some(status) if !status.is_empty() => {
            (0, Flag::Red(format!("Company status is {}", status)))
        }
        _ => (0, Flag::Red("Company status is Unknown".into())),
    }
}

fn identifier_consistency(consistency_ok: bool) -> (u32, Flag) {
    if consistency_ok {
        (
            10,
            Flag::Green("CIN number matches between input and MCA records".into()),
        )
    } else {
        (0, Flag::Red("CIN number mismatch or not verifiable".into()))
    }
}

fn reputation_rule(reputation: &SourceResult) -> (u32, Flag) {
    let Some(payload) = reputation.payload() else {
        return (
            NEUTRAL_REPUTATION_POINTS,
            Flag::Green("No reputation data available (neutral)".into()),
        );
    };

    match payload.reputation {
        Some(signal) if signal.classification == ReputationClass::Legit => {
            (20, Flag::Green("No scam reports found".into()))
        }
        Some(signal) if signal.classification == ReputationClass::Scam => (
            0,
            Flag::Red(format!(
                "Scam reports found ({} reports)",
                signal.negative_reports
            )),
        ),
        _ => (
            NEUTRAL_REPUTATION_POINTS,
            Flag::Green("Limited reputation data available (neutral)".into()),
        ),
    }
}

fn employability_rule(employability: &SourceResult) -> (u32, Flag) {
    let strength = employability.payload().and_then(|p| p.employability);

    match strength {
        Some(EmployabilityStrength::Strong) => (
            10,
            Flag::Green("Strong employability signals found".into()),
        ),
        Some(EmployabilityStrength::Moderate) => (
            7,
            Flag::Green("Moderate employability signals found".into()),
        ),
        Some(EmployabilityStrength::Weak) => {
            (4, Flag::Green("Weak employability signals found".into()))
        }
        Some(EmployabilityStrength::Unknown) | None => (
            NEUTRAL_EMPLOYABILITY_POINTS,
            Flag::Green("No employability data available (neutral)".into()),
        ),
    }
}
