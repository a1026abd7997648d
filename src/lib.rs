pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod scoring;
pub mod slug;
pub mod sources;

// Re-export main types
pub use config::VetConfig;
pub use error::{Result, VetError};
pub use models::{
    Field, FieldError, SourceError, SourceErrorKind, SourceName, SourceOutcome, SourcePayload,
    SourceResult, ValidationRequest,
};
pub use orchestrator::{BackgroundValidation, Budgets, CompanyValidator};
pub use output::{LegitimacyReport, render_text};
pub use scoring::{Classification, Confidence, ScoreBreakdown};
pub use sources::{
    CorporateRegistryCheck, EmployabilityCheck, RecordedSources, ReputationCheck, SourceSet,
    TaxRegistryCheck,
};

// Re-export slug utilities
pub use slug::{correlation_token, slugify, slugify_truncate};
