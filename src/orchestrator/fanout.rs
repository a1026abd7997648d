//! Concurrent fan-out to the four evidence sources.
//!
//! All checks start together and are joined at a single barrier. Each slot
//! always settles: a check that errors, exceeds its budget or panics becomes
//! a `Failed` result for that slot and never disturbs its siblings.
//!
//! The four futures are polled inside the caller's task rather than
//! spawned, so dropping the fan-out (caller cancellation, request deadline)
//! drops every in-flight check with it.

use std::any::Any;
use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{SourceError, SourceName, SourcePayload, SourceResult, ValidationRequest};
use crate::sources::SourceSet;

use super::budget::Budgets;

/// One settled result per source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceResults {
    pub tax: SourceResult,
    pub corporate: SourceResult,
    pub reputation: SourceResult,
    pub employability: SourceResult,
}

impl SourceResults {
    pub fn iter(&self) -> impl Iterator<Item = &SourceResult> {
        [&self.tax, &self.corporate, &self.reputation, &self.employability].into_iter()
    }

    pub fn failed_count(&self) -> usize {
        self.iter().filter(|r| !r.is_ok()).count()
    }

    /// Keyed by source name, results moved unmodified
    pub fn into_map(self) -> BTreeMap<SourceName, SourceResult> {
        [self.tax, self.corporate, self.reputation, self.employability]
            .into_iter()
            .map(|r| (r.source, r))
            .collect()
    }
}

/// Wall-clock timing around the whole fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanOutTiming {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// Issues every source check for a request and waits for all of them
#[derive(Debug, Clone)]
pub struct Orchestrator {
    sources: SourceSet,
    budgets: Budgets,
}

impl Orchestrator {
    pub fn new(sources: SourceSet, budgets: Budgets) -> Self {
        Self { sources, budgets }
    }

    pub fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    /// Run all four checks concurrently; wait for all, fail none
    pub async fn run_all(&self, request: &ValidationRequest) -> (SourceResults, FanOutTiming) {
        let company = request.company_name();
        info!(company, "Starting source fan-out");

        let started_at = Utc::now();
        let clock = Instant::now();

        let (tax, corporate, reputation, employability) = tokio::join!(
            settle(
                SourceName::TaxRegistry,
                self.budgets.timeout_for(SourceName::TaxRegistry),
                self.sources.tax.check_tax_registry(request.tax_id()),
            ),
            settle(
                SourceName::CorporateRegistry,
                self.budgets.timeout_for(SourceName::CorporateRegistry),
                self.sources
                    .corporate
                    .check_corporate_registry(company, request.corporate_id()),
            ),
            settle(
                SourceName::Reputation,
                self.budgets.timeout_for(SourceName::Reputation),
                self.sources.reputation.check_reputation_signals(company),
            ),
            settle(
                SourceName::Employability,
                self.budgets.timeout_for(SourceName::Employability),
                self.sources.employability.check_employability_signals(company),
            ),
        );

        let timing = FanOutTiming {
            started_at,
            finished_at: Utc::now(),
            elapsed_ms: clock.elapsed().as_millis() as u64,
        };

        let results = SourceResults {
            tax,
            corporate,
            reputation,
            employability,
        };

        info!(
            company,
            elapsed_ms = timing.elapsed_ms,
            failed = results.failed_count(),
            "All sources settled"
        );

        (results, timing)
    }
}

/// Await one check under its budget, converting every failure mode into a
/// `Failed` result.
async fn settle<F>(source: SourceName, budget: Duration, check: F) -> SourceResult
where
    F: Future<Output = Result<SourcePayload, SourceError>>,
{
    let clock = Instant::now();
    let settled = AssertUnwindSafe(tokio::time::timeout(budget, check))
        .catch_unwind()
        .await;

    let outcome = match settled {
        Ok(Ok(result)) => result,
        Ok(Err(_elapsed)) => Err(SourceError::timeout(format!(
            "no response within {}ms",
            budget.as_millis()
        ))),
        Err(panic) => Err(SourceError::unknown(format!(
            "source check panicked: {}",
            panic_message(panic.as_ref())
        ))),
    };

    let elapsed_ms = clock.elapsed().as_millis() as u64;
    match &outcome {
        Ok(_) => debug!(source = %source, elapsed_ms, "Source check succeeded"),
        Err(err) => warn!(
            source = %source,
            kind = %err.kind,
            elapsed_ms,
            "Source check failed: {}",
            err.message
        ),
    }

    SourceResult {
        source,
        outcome: outcome.into(),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceErrorKind;

    #[tokio::test]
    async fn test_settle_success() {
        let result = settle(SourceName::TaxRegistry, Duration::from_secs(1), async {
            Ok::<_, SourceError>(SourcePayload::new().with_status("Active"))
        })
        .await;

        assert_eq!(result.source, SourceName::TaxRegistry);
        assert_eq!(
            result.payload().and_then(|p| p.status.as_deref()),
            Some("Active")
        );
    }

    #[tokio::test]
    async fn test_settle_passes_source_error_through() {
        let result = settle(SourceName::CorporateRegistry, Duration::from_secs(1), async {
            Err::<SourcePayload, _>(SourceError::parse("unexpected table layout"))
        })
        .await;

        let err = result.error().unwrap();
        assert_eq!(err.kind, SourceErrorKind::ParseError);
        assert_eq!(err.message, "unexpected table layout");
    }

    #[tokio::test]
    async fn test_settle_converts_timeout() {
        let result = settle(SourceName::Reputation, Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, SourceError>(SourcePayload::new())
        })
        .await;

        let err = result.error().unwrap();
        assert_eq!(err.kind, SourceErrorKind::Timeout);
        assert_eq!(err.message, "no response within 20ms");
    }

    #[tokio::test]
    async fn test_settle_converts_panic() {
        let result = settle(SourceName::Employability, Duration::from_secs(1), async {
            if true {
                panic!("selector not found");
            }
            Ok::<_, SourceError>(SourcePayload::new())
        })
        .await;

        let err = result.error().unwrap();
        assert_eq!(err.kind, SourceErrorKind::UnknownError);
        assert!(err.message.contains("selector not found"));
    }

    #[test]
    fn test_into_map_keys_by_source() {
        let results = SourceResults {
            tax: SourceResult::found(SourceName::TaxRegistry, SourcePayload::new()),
            corporate: SourceResult::failed(
                SourceName::CorporateRegistry,
                SourceError::not_found("none"),
            ),
            reputation: SourceResult::found(SourceName::Reputation, SourcePayload::new()),
            employability: SourceResult::found(SourceName::Employability, SourcePayload::new()),
        };
        assert_eq!(results.failed_count(), 1);

        let map = results.clone().into_map();
        assert_eq!(map.len(), 4);
        assert_eq!(map[&SourceName::CorporateRegistry], results.corporate);
    }
}
