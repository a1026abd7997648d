//! Request pipeline: validate input, fan out, check consistency, score,
//! classify and assemble.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::{Result, VetError};
use crate::models::ValidationRequest;
use crate::output::{LegitimacyReport, assemble, assemble_invalid};
use crate::scoring::ScoringEngine;
use crate::slug::correlation_token;
use crate::sources::SourceSet;

use super::budget::Budgets;
use super::consistency::check_identifier_consistency;
use super::fanout::Orchestrator;
use super::input::InputValidator;

/// Entry point for company legitimacy validation
#[derive(Debug, Clone)]
pub struct CompanyValidator {
    input: InputValidator,
    orchestrator: Orchestrator,
    scoring: ScoringEngine,
}

impl CompanyValidator {
    pub fn new(sources: SourceSet) -> Self {
        Self::with_budgets(sources, Budgets::default())
    }

    pub fn with_budgets(sources: SourceSet, budgets: Budgets) -> Self {
        Self {
            input: InputValidator::default(),
            orchestrator: Orchestrator::new(sources, budgets),
            scoring: ScoringEngine::new(),
        }
    }

    pub fn budgets(&self) -> &Budgets {
        self.orchestrator.budgets()
    }

    /// Validate one company. Always yields a report: invalid input produces
    /// an `INVALID` report without contacting any source.
    pub async fn validate_company(
        &self,
        company_name: &str,
        corporate_id: &str,
        tax_id: &str,
    ) -> LegitimacyReport {
        let request = ValidationRequest::new(company_name, corporate_id, tax_id);

        if let Err(errors) = self.input.validate(&request) {
            warn!(
                company = request.company_name(),
                errors = errors.len(),
                "Input validation failed, no sources contacted"
            );
            return assemble_invalid(request, errors);
        }

        self.evaluate(request).await
    }

    /// Like [`validate_company`](Self::validate_company), bounded by an
    /// overall deadline. On expiry every in-flight check is dropped.
    pub async fn validate_company_within(
        &self,
        company_name: &str,
        corporate_id: &str,
        tax_id: &str,
        deadline: Duration,
    ) -> Result<LegitimacyReport> {
        tokio::time::timeout(
            deadline,
            self.validate_company(company_name, corporate_id, tax_id),
        )
        .await
        .map_err(|_| deadline_exceeded(deadline))
    }

    /// Strict variant: invalid input is an error, and the configured request
    /// deadline (if any) applies.
    pub async fn try_validate(&self, request: ValidationRequest) -> Result<LegitimacyReport> {
        self.input
            .validate(&request)
            .map_err(|errors| VetError::InvalidInput { errors })?;

        match self.budgets().request_deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.evaluate(request))
                .await
                .map_err(|_| deadline_exceeded(deadline)),
            None => Ok(self.evaluate(request).await),
        }
    }

    /// Fire-and-forget validation. Returns at once; the outcome is only
    /// logged under the correlation token. The configured request deadline
    /// applies.
    pub fn spawn_validation(
        self: &Arc<Self>,
        company_name: impl Into<String>,
        corporate_id: impl Into<String>,
        tax_id: impl Into<String>,
        correlation: Option<String>,
    ) -> BackgroundValidation {
        let company_name = company_name.into();
        let corporate_id = corporate_id.into();
        let tax_id = tax_id.into();
        let token = correlation.unwrap_or_else(|| correlation_token(&company_name));

        let cancel = CancellationToken::new();
        let validator = Arc::clone(self);
        let task_cancel = cancel.clone();
        let task_token = token.clone();

        info!(token = %token, company = %company_name, "Background validation started");

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = task_cancel.cancelled() => {
                    warn!(token = %task_token, "Background validation cancelled");
                }
                outcome = validator.validate_bounded(&company_name, &corporate_id, &tax_id) => {
                    match outcome {
                        Ok(report) => info!(
                            token = %task_token,
                            classification = %report.classification,
                            total_score = ?report.total_score,
                            "Background validation completed"
                        ),
                        Err(e) => warn!(token = %task_token, "Background validation failed: {}", e),
                    }
                }
            }
        });

        BackgroundValidation {
            token,
            cancel,
            handle,
        }
    }

    /// `validate_company` under the configured request deadline, if any
    async fn validate_bounded(
        &self,
        company_name: &str,
        corporate_id: &str,
        tax_id: &str,
    ) -> Result<LegitimacyReport> {
        match self.budgets().request_deadline {
            Some(deadline) => {
                self.validate_company_within(company_name, corporate_id, tax_id, deadline)
                    .await
            }
            None => Ok(self.validate_company(company_name, corporate_id, tax_id).await),
        }
    }

    async fn evaluate(&self, request: ValidationRequest) -> LegitimacyReport {
        let (results, timing) = self.orchestrator.run_all(&request).await;

        let consistency_ok =
            check_identifier_consistency(&results.corporate, request.corporate_id());
        let outcome = self.scoring.score(
            &results.tax,
            &results.corporate,
            consistency_ok,
            &results.reputation,
            &results.employability,
        );
        let classification = outcome.classification();

        info!(
            company = request.company_name(),
            total_score = outcome.total_score(),
            classification = %classification,
            green = outcome.flags.green.len(),
            red = outcome.flags.red.len(),
            "Validation complete"
        );

        assemble(
            request,
            outcome.breakdown,
            classification,
            outcome.flags,
            results,
            timing,
        )
    }
}

fn deadline_exceeded(deadline: Duration) -> VetError {
    let deadline_ms = deadline.as_millis() as u64;
    warn!(deadline_ms, "Validation deadline exceeded, in-flight checks dropped");
    VetError::DeadlineExceeded { deadline_ms }
}

/// Handle to a fire-and-forget validation
#[derive(Debug)]
pub struct BackgroundValidation {
    token: String,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl BackgroundValidation {
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Stop the validation; in-flight checks are dropped
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the background task to finish or be cancelled
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            error!(token = %self.token, "Background validation task failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EmployabilityStrength, ReputationSignal, SourceError, SourceName, SourcePayload,
    };
    use crate::scoring::Classification;
    use crate::sources::{RecordedSource, RecordedSources};

    const CIN: &str = "U72900KA2018PTC123456";
    const GSTIN: &str = "29AABCT1332L1ZU";

    fn all_positive() -> SourceSet {
        SourceSet::from_shared(Arc::new(RecordedSources {
            tax_registry: Some(RecordedSource::found(
                SourcePayload::new().with_status("Active"),
            )),
            corporate_registry: Some(RecordedSource::found(
                SourcePayload::new()
                    .with_identifier(CIN)
                    .with_status("Active"),
            )),
            reputation: Some(RecordedSource::found(
                SourcePayload::new().with_reputation(ReputationSignal::from_report_count(0)),
            )),
            employability: Some(RecordedSource::found(
                SourcePayload::new().with_employability(EmployabilityStrength::Strong),
            )),
        }))
    }

    #[tokio::test]
    async fn test_validate_company_all_positive() {
        let validator = CompanyValidator::new(all_positive());
        let report = validator
            .validate_company("Acme Pvt Ltd", CIN, GSTIN)
            .await;

        assert_eq!(report.total_score, Some(100));
        assert_eq!(report.classification, Classification::Legitimate);
        assert_eq!(report.detailed_results.len(), 4);
    }

    #[tokio::test]
    async fn test_validate_company_normalizes_input() {
        let validator = CompanyValidator::new(all_positive());
        let report = validator
            .validate_company("  Acme Pvt Ltd ", &CIN.to_lowercase(), &format!(" {} ", GSTIN))
            .await;

        assert_eq!(report.request.corporate_id(), CIN);
        assert_eq!(report.request.tax_id(), GSTIN);
        assert_eq!(report.classification, Classification::Legitimate);
    }

    #[tokio::test]
    async fn test_try_validate_rejects_invalid_input() {
        let validator = CompanyValidator::new(all_positive());
        let err = validator
            .try_validate(ValidationRequest::new("Acme", "U7290", GSTIN))
            .await
            .unwrap_err();

        match err {
            VetError::InvalidInput { errors } => assert_eq!(errors.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_try_validate_applies_request_deadline() {
        let slow = RecordedSources {
            tax_registry: Some(
                RecordedSource::failed(SourceError::network("unreachable")).with_latency(2_000),
            ),
            ..Default::default()
        };
        let budgets = Budgets::default().with_request_deadline(Duration::from_millis(50));
        let validator =
            CompanyValidator::with_budgets(SourceSet::from_shared(Arc::new(slow)), budgets);

        let err = validator
            .try_validate(ValidationRequest::new("Acme Pvt Ltd", CIN, GSTIN))
            .await
            .unwrap_err();
        assert!(matches!(err, VetError::DeadlineExceeded { deadline_ms: 50 }));
    }

    #[tokio::test]
    async fn test_missing_recordings_score_as_failures() {
        let validator =
            CompanyValidator::new(SourceSet::from_shared(Arc::new(RecordedSources::default())));
        let report = validator
            .validate_company("Acme Pvt Ltd", CIN, GSTIN)
            .await;

        assert_eq!(report.total_score, Some(15));
        assert_eq!(report.classification, Classification::NotLegitimate);
        assert!(
            report.detailed_results[&SourceName::TaxRegistry]
                .error()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_spawn_validation_uses_supplied_token() {
        let validator = Arc::new(CompanyValidator::new(all_positive()));
        let background =
            validator.spawn_validation("Acme Pvt Ltd", CIN, GSTIN, Some("req-42".to_string()));

        assert_eq!(background.token(), "req-42");
        background.wait().await;
    }
}
