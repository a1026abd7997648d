//! Scripted source doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use corp_vet::models::{EmployabilityStrength, ReputationSignal};
use corp_vet::{
    CorporateRegistryCheck, EmployabilityCheck, ReputationCheck, SourceError, SourcePayload,
    SourceSet, TaxRegistryCheck,
};

pub const ACME_NAME: &str = "Acme Pvt Ltd";
pub const ACME_CIN: &str = "U72900KA2018PTC123456";
pub const ACME_GSTIN: &str = "29AABCT1332L1ZU";

#[derive(Debug, Clone)]
pub enum Response {
    Found(SourcePayload),
    Failed(SourceError),
    Panic(&'static str),
    /// Never resolves
    Hang,
}

#[derive(Debug, Clone)]
pub struct Script {
    pub latency: Duration,
    pub response: Response,
}

impl Script {
    pub fn found(payload: SourcePayload) -> Self {
        Self {
            latency: Duration::ZERO,
            response: Response::Found(payload),
        }
    }

    pub fn failed(error: SourceError) -> Self {
        Self {
            latency: Duration::ZERO,
            response: Response::Failed(error),
        }
    }

    pub fn panics(message: &'static str) -> Self {
        Self {
            latency: Duration::ZERO,
            response: Response::Panic(message),
        }
    }

    pub fn hangs() -> Self {
        Self {
            latency: Duration::ZERO,
            response: Response::Hang,
        }
    }

    pub fn after_ms(mut self, ms: u64) -> Self {
        self.latency = Duration::from_millis(ms);
        self
    }
}

/// Counters shared with the test body
#[derive(Debug, Default)]
pub struct Counters {
    /// Checks started
    pub calls: AtomicUsize,
    /// Checks that returned a value
    pub completed: AtomicUsize,
    /// Checks whose future was dropped, completed or not
    pub released: AtomicUsize,
}

impl Counters {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

struct InFlight(Arc<Counters>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Source double that replays one script per source and records calls
pub struct SpySources {
    pub tax: Script,
    pub corporate: Script,
    pub reputation: Script,
    pub employability: Script,
    pub counters: Arc<Counters>,
}

impl SpySources {
    /// Every source answers positively (the Acme scenario)
    pub fn all_positive() -> Self {
        Self {
            tax: Script::found(SourcePayload::new().with_status("Active")),
            corporate: Script::found(
                SourcePayload::new()
                    .with_identifier(ACME_CIN)
                    .with_status("Active"),
            ),
            reputation: Script::found(
                SourcePayload::new().with_reputation(ReputationSignal::from_report_count(0)),
            ),
            employability: Script::found(
                SourcePayload::new().with_employability(EmployabilityStrength::Strong),
            ),
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn all(script: Script) -> Self {
        Self {
            tax: script.clone(),
            corporate: script.clone(),
            reputation: script.clone(),
            employability: script,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Build the source set; returns the counters for assertions
    pub fn into_set(self) -> (SourceSet, Arc<Counters>) {
        let counters = self.counters.clone();
        (SourceSet::from_shared(Arc::new(self)), counters)
    }

    async fn play(&self, script: &Script) -> Result<SourcePayload, SourceError> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlight(self.counters.clone());

        if !script.latency.is_zero() {
            tokio::time::sleep(script.latency).await;
        }

        let result = match &script.response {
            Response::Found(payload) => Ok(payload.clone()),
            Response::Failed(err) => Err(err.clone()),
            Response::Panic(message) => panic!("{}", message),
            Response::Hang => std::future::pending().await,
        };

        self.counters.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl TaxRegistryCheck for SpySources {
    async fn check_tax_registry(&self, _tax_id: &str) -> Result<SourcePayload, SourceError> {
        self.play(&self.tax).await
    }
}

#[async_trait]
impl CorporateRegistryCheck for SpySources {
    async fn check_corporate_registry(
        &self,
        _company_name: &str,
        _corporate_id: &str,
    ) -> Result<SourcePayload, SourceError> {
        self.play(&self.corporate).await
    }
}

#[async_trait]
impl ReputationCheck for SpySources {
    async fn check_reputation_signals(
        &self,
        _company_name: &str,
    ) -> Result<SourcePayload, SourceError> {
        self.play(&self.reputation).await
    }
}

#[async_trait]
impl EmployabilityCheck for SpySources {
    async fn check_employability_signals(
        &self,
        _company_name: &str,
    ) -> Result<SourcePayload, SourceError> {
        self.play(&self.employability).await
    }
}
