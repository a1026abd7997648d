//! Score breakdown and flag types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the scoring rule table, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    TaxValidity,
    TaxStatus,
    RegistryValidity,
    RegistryStatus,
    IdentifierConsistency,
    Reputation,
    Employability,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::TaxValidity,
        Criterion::TaxStatus,
        Criterion::RegistryValidity,
        Criterion::RegistryStatus,
        Criterion::IdentifierConsistency,
        Criterion::Reputation,
        Criterion::Employability,
    ];

    pub fn max_points(&self) -> u32 {
        match self {
            Criterion::TaxValidity => 20,
            Criterion::TaxStatus => 10,
            Criterion::RegistryValidity => 20,
            Criterion::RegistryStatus => 10,
            Criterion::IdentifierConsistency => 10,
            Criterion::Reputation => 20,
            Criterion::Employability => 10,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Criterion::TaxValidity => "GST registration",
            Criterion::TaxStatus => "GST status",
            Criterion::RegistryValidity => "MCA registration",
            Criterion::RegistryStatus => "MCA company status",
            Criterion::IdentifierConsistency => "CIN consistency",
            Criterion::Reputation => "Reputation",
            Criterion::Employability => "Employability",
        };
        f.write_str(label)
    }
}

/// Points awarded per criterion.
///
/// Always built by the scoring engine, so every field is within its
/// criterion's maximum and `total_score() <= MAX_TOTAL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub tax_validity: u32,
    pub tax_status: u32,
    pub registry_validity: u32,
    pub registry_status: u32,
    pub identifier_consistency: u32,
    pub reputation: u32,
    pub employability: u32,
}

impl ScoreBreakdown {
    pub const MAX_TOTAL: u32 = 100;

    pub fn get(&self, criterion: Criterion) -> u32 {
        match criterion {
            Criterion::TaxValidity => self.tax_validity,
            Criterion::TaxStatus => self.tax_status,
            Criterion::RegistryValidity => self.registry_validity,
            Criterion::RegistryStatus => self.registry_status,
            Criterion::IdentifierConsistency => self.identifier_consistency,
            Criterion::Reputation => self.reputation,
            Criterion::Employability => self.employability,
        }
    }

    pub(crate) fn set(&mut self, criterion: Criterion, points: u32) {
        let slot = match criterion {
            Criterion::TaxValidity => &mut self.tax_validity,
            Criterion::TaxStatus => &mut self.tax_status,
            Criterion::RegistryValidity => &mut self.registry_validity,
            Criterion::RegistryStatus => &mut self.registry_status,
            Criterion::IdentifierConsistency => &mut self.identifier_consistency,
            Criterion::Reputation => &mut self.reputation,
            Criterion::Employability => &mut self.employability,
        };
        *slot = points.min(criterion.max_points());
    }

    /// Sub-scores in rule-table order
    pub fn sub_scores(&self) -> [u32; 7] {
        Criterion::ALL.map(|c| self.get(c))
    }

    pub fn maxima() -> [u32; 7] {
        Criterion::ALL.map(|c| c.max_points())
    }

    pub fn total_score(&self) -> u32 {
        self.sub_scores().iter().sum()
    }

    /// Tax registry share (validity + status), out of 30
    pub fn tax_registry_score(&self) -> u32 {
        self.tax_validity + self.tax_status
    }

    /// Corporate registry share (validity + status), out of 30
    pub fn corporate_registry_score(&self) -> u32 {
        self.registry_validity + self.registry_status
    }
}

/// Ordered green and red flags explaining a score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub green: Vec<String>,
    pub red: Vec<String>,
}

impl Flags {
    pub fn push(&mut self, flag: Flag) {
        match flag {
            Flag::Green(msg) => self.green.push(msg),
            Flag::Red(msg) => self.red.push(msg),
        }
    }

    pub fn len(&self) -> usize {
        self.green.len() + self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome message of a single rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    Green(String),
    Red(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maxima_sum_to_total() {
        assert_eq!(
            ScoreBreakdown::maxima().iter().sum::<u32>(),
            ScoreBreakdown::MAX_TOTAL
        );
    }

    #[test]
    fn test_set_clamps_to_criterion_max() {
        let mut breakdown = ScoreBreakdown::default();
        breakdown.set(Criterion::TaxStatus, 50);
        assert_eq!(breakdown.tax_status, 10);
    }

    #[test]
    fn test_grouped_registry_scores() {
        let breakdown = ScoreBreakdown {
            tax_validity: 20,
            tax_status: 0,
            registry_validity: 20,
            registry_status: 10,
            ..Default::default()
        };
        assert_eq!(breakdown.tax_registry_score(), 20);
        assert_eq!(breakdown.corporate_registry_score(), 30);
        assert_eq!(breakdown.total_score(), 50);
    }
}
