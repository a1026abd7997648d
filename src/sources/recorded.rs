//! File-backed sources that replay recorded outcomes.
//!
//! Lets the CLI and tests run the whole pipeline without live registries.
//! The file maps each source name to an outcome and an optional latency:
//!
//! ```yaml
//! tax_registry:
//!   latency_ms: 120
//!   outcome:
//!     result: found
//!     data: { status: Active }
//! corporate_registry:
//!   outcome:
//!     result: failed
//!     data: { kind: NOT_FOUND, message: "no company matched" }
//! ```
//!
//! Sources missing from the file fail with `UNKNOWN_ERROR`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VetError;
use crate::models::{SourceError, SourceName, SourceOutcome, SourcePayload};

use super::{CorporateRegistryCheck, EmployabilityCheck, ReputationCheck, TaxRegistryCheck};

/// One recorded response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSource {
    /// Simulated response latency
    #[serde(default)]
    pub latency_ms: u64,
    pub outcome: SourceOutcome,
}

impl RecordedSource {
    pub fn found(payload: SourcePayload) -> Self {
        Self {
            latency_ms: 0,
            outcome: SourceOutcome::Found(payload),
        }
    }

    pub fn failed(error: SourceError) -> Self {
        Self {
            latency_ms: 0,
            outcome: SourceOutcome::Failed(error),
        }
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedSources {
    #[serde(default)]
    pub tax_registry: Option<RecordedSource>,
    #[serde(default)]
    pub corporate_registry: Option<RecordedSource>,
    #[serde(default)]
    pub reputation: Option<RecordedSource>,
    #[serde(default)]
    pub employability: Option<RecordedSource>,
}

impl RecordedSources {
    /// Load from a `.json` file, or YAML for any other extension
    pub fn from_file(path: &Path) -> Result<Self, VetError> {
        let fixture_err = |message: String| VetError::Fixture {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| fixture_err(e.to_string()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content).map_err(|e| fixture_err(e.to_string()))
        } else {
            serde_yaml::from_str(&content).map_err(|e| fixture_err(e.to_string()))
        }
    }

    fn slot(&self, source: SourceName) -> Option<&RecordedSource> {
        match source {
            SourceName::TaxRegistry => self.tax_registry.as_ref(),
            SourceName::CorporateRegistry => self.corporate_registry.as_ref(),
            SourceName::Reputation => self.reputation.as_ref(),
            SourceName::Employability => self.employability.as_ref(),
        }
    }

    async fn replay(&self, source: SourceName) -> Result<SourcePayload, SourceError> {
        let Some(recorded) = self.slot(source) else {
            return Err(SourceError::unknown(format!(
                "no recorded response for {}",
                source
            )));
        };

        if recorded.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(recorded.latency_ms)).await;
        }
        debug!(source = %source, latency_ms = recorded.latency_ms, "Replayed recorded response");

        match &recorded.outcome {
            SourceOutcome::Found(payload) => Ok(payload.clone()),
            SourceOutcome::Failed(err) => Err(err.clone()),
        }
    }
}

#[async_trait]
impl TaxRegistryCheck for RecordedSources {
    async fn check_tax_registry(&self, _tax_id: &str) -> Result<SourcePayload, SourceError> {
        self.replay(SourceName::TaxRegistry).await
    }
}

#[async_trait]
impl CorporateRegistryCheck for RecordedSources {
    async fn check_corporate_registry(
        &self,
        _company_name: &str,
        _corporate_id: &str,
    ) -> Result<SourcePayload, SourceError> {
        self.replay(SourceName::CorporateRegistry).await
    }
}

#[async_trait]
impl ReputationCheck for RecordedSources {
    async fn check_reputation_signals(
        &self,
        _company_name: &str,
    ) -> Result<SourcePayload, SourceError> {
        self.replay(SourceName::Reputation).await
    }
}

#[async_trait]
impl EmployabilityCheck for RecordedSources {
    async fn check_employability_signals(
        &self,
        _company_name: &str,
    ) -> Result<SourcePayload, SourceError> {
        self.replay(SourceName::Employability).await
    }
}
