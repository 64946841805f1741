//! Incident triage for the HACCP/HMS deviation register.
//!
//! Classification is a fixed lookup: the first keyword family found in the
//! description picks the analysis sentence, and the severity tier picks the
//! consequence list and remediation checklist.

mod classifier;
pub mod domain;
pub mod keywords;
mod playbook;
pub mod register;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{classify, TriageClassifier};
pub use domain::{IncidentCategory, IncidentText, Severity, SeverityTier, TriageResult};
pub use keywords::{match_category, KeywordFamily, KEYWORD_FAMILIES};
pub use register::{
    IncidentId, IncidentRecord, IncidentRegister, IncidentStatus, IncidentView, RegisterError,
};
pub use router::incident_router;
pub use service::{IncidentServiceError, IncidentTriageService};
