//! Daily HACCP compliance dashboard: folds temperature, cleaning, hygiene, and
//! incident counts into one compliance percentage and a coarse risk level.
//!
//! Scoring is pure. Fetching counts goes through [`DailyCheckSource`], and a
//! fetch that fails counts as an empty category rather than an error.

pub mod domain;
pub mod import;
mod insights;
mod policy;
mod scoring;
mod snapshot;
pub mod source;
pub mod views;

pub use domain::{
    CheckCategory, CompletionTally, DailyCheckCounts, RiskLevel, TemperatureReading,
};
pub use import::{LoggedTemperature, TemperatureImportError, TemperatureLogImporter};
pub use insights::DashboardInsights;
pub use policy::{assess_risk, RiskAssessment, RiskPolicy, RiskSignals};
pub use scoring::{safe_ratio, VACUOUS_SCORE};
pub use snapshot::{compute_snapshot, ComplianceAggregator, ComplianceSnapshot};
pub use source::{
    CollectedChecks, DailyCheckSource, DailyChecksCollector, DegradedSource, SourceError,
};
pub use views::{CategoryScoreEntry, ComplianceSnapshotView};
