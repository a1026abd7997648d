//! External evidence sources.
//!
//! Each source is an async collaborator that returns either a normalized
//! payload or a typed [`SourceError`]. Scraping, search and classification
//! mechanics live behind these traits and are not part of this crate.

mod recorded;

pub use recorded::{RecordedSource, RecordedSources};

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{SourceError, SourcePayload};

/// Tax registry (GSTIN) lookup; payload carries `status`
#[async_trait]
pub trait TaxRegistryCheck: Send + Sync {
    async fn check_tax_registry(&self, tax_id: &str) -> Result<SourcePayload, SourceError>;
}

/// Corporate registry (CIN) lookup; payload carries `identifier` and `status`
#[async_trait]
pub trait CorporateRegistryCheck: Send + Sync {
    async fn check_corporate_registry(
        &self,
        company_name: &str,
        corporate_id: &str,
    ) -> Result<SourcePayload, SourceError>;
}

/// Scam-report search; payload carries a [`crate::models::ReputationSignal`]
#[async_trait]
pub trait ReputationCheck: Send + Sync {
    async fn check_reputation_signals(
        &self,
        company_name: &str,
    ) -> Result<SourcePayload, SourceError>;
}

/// Employability search; payload carries an [`crate::models::EmployabilityStrength`]
#[async_trait]
pub trait EmployabilityCheck: Send + Sync {
    async fn check_employability_signals(
        &self,
        company_name: &str,
    ) -> Result<SourcePayload, SourceError>;
}

/// The four collaborators consulted for every request
#[derive(Clone)]
pub struct SourceSet {
    pub tax: Arc<dyn TaxRegistryCheck>,
    pub corporate: Arc<dyn CorporateRegistryCheck>,
    pub reputation: Arc<dyn ReputationCheck>,
    pub employability: Arc<dyn EmployabilityCheck>,
}

impl SourceSet {
    pub fn new(
        tax: Arc<dyn TaxRegistryCheck>,
        corporate: Arc<dyn CorporateRegistryCheck>,
        reputation: Arc<dyn ReputationCheck>,
        employability: Arc<dyn EmployabilityCheck>,
    ) -> Self {
        Self {
            tax,
            corporate,
            reputation,
            employability,
        }
    }

    /// Use one value that implements all four checks
    pub fn from_shared<S>(source: Arc<S>) -> Self
    where
        S: TaxRegistryCheck + CorporateRegistryCheck + ReputationCheck + EmployabilityCheck + 'static,
    {
        Self {
            tax: source.clone(),
            corporate: source.clone(),
            reputation: source.clone(),
            employability: source,
        }
    }
}

impl std::fmt::Debug for SourceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSet").finish_non_exhaustive()
    }
}
