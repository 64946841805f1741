use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{IncidentText, Severity, TriageResult};

/// Identifier wrapper for registered incidents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IncidentId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Open,
    Closed,
}

impl IncidentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Åpen",
            Self::Closed => "Lukket",
        }
    }
}

/// Deviation-register entry: the reported text and the triage stored with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: IncidentId,
    pub text: IncidentText,
    pub triage: TriageResult,
    pub reported_on: NaiveDate,
    pub status: IncidentStatus,
    pub closed_on: Option<NaiveDate>,
}

impl IncidentRecord {
    pub fn is_open_critical(&self) -> bool {
        self.status == IncidentStatus::Open
            && self.text.preselected_severity == Some(Severity::Critical)
    }

    pub fn view(&self) -> IncidentView {
        IncidentView {
            incident_id: self.id.clone(),
            title: self.text.title.clone(),
            severity: self.text.preselected_severity.map(Severity::label),
            status: self.status.label(),
            category: self.triage.category.label(),
            reported_on: self.reported_on,
            closed_on: self.closed_on,
            triage: self.triage.clone(),
        }
    }
}

/// Storage abstraction so the service can run against any record store.
pub trait IncidentRegister: Send + Sync {
    fn insert(&self, record: IncidentRecord) -> Result<IncidentRecord, RegisterError>;
    fn update(&self, record: IncidentRecord) -> Result<(), RegisterError>;
    fn fetch(&self, id: &IncidentId) -> Result<Option<IncidentRecord>, RegisterError>;
    fn open_records(&self) -> Result<Vec<IncidentRecord>, RegisterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("incident already registered")]
    Conflict,
    #[error("incident not found")]
    NotFound,
    #[error("incident register unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized record shape returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentView {
    pub incident_id: IncidentId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<&'static str>,
    pub status: &'static str,
    pub category: &'static str,
    pub reported_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_on: Option<NaiveDate>,
    pub triage: TriageResult,
}
