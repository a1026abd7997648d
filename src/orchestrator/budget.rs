//! Time budgets enforced around source checks.
//!
//! Two hard limits:
//! - per-source budget: a check that exceeds it settles as `TIMEOUT`,
//!   siblings are unaffected
//! - request deadline (optional): the whole fan-out is dropped and the
//!   request fails with `DeadlineExceeded`
//!
//! Neither limit retries anything.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::VetConfig;
use crate::models::SourceName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budgets {
    /// Default budget for each source check
    pub source_timeout: Duration,
    /// Per-source budget overrides
    pub overrides: BTreeMap<SourceName, Duration>,
    /// Overall request deadline. Honored by `try_validate` and
    /// `spawn_validation`; `validate_company` always returns a report, so
    /// callers bound it with `validate_company_within` instead.
    pub request_deadline: Option<Duration>,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_secs(90),
            overrides: BTreeMap::new(),
            request_deadline: None,
        }
    }
}

impl Budgets {
    pub fn from_config(config: &VetConfig) -> Self {
        Self {
            source_timeout: Duration::from_secs(config.sources.timeout_secs),
            overrides: config
                .sources
                .overrides
                .iter()
                .map(|(source, secs)| (*source, Duration::from_secs(*secs)))
                .collect(),
            request_deadline: config.request.deadline_secs.map(Duration::from_secs),
        }
    }

    /// Uniform per-source budget, no overrides
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self.overrides.clear();
        self
    }

    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = Some(deadline);
        self
    }

    pub fn timeout_for(&self, source: SourceName) -> Duration {
        self.overrides
            .get(&source)
            .copied()
            .unwrap_or(self.source_timeout)
    }
}
