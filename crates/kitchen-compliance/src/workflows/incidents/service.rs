use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::classifier::TriageClassifier;
use super::domain::{IncidentText, TriageResult};
use super::register::{
    IncidentId, IncidentRecord, IncidentRegister, IncidentStatus, RegisterError,
};

/// Service composing the triage classifier with the incident register.
pub struct IncidentTriageService<R> {
    register: Arc<R>,
    classifier: TriageClassifier,
}

static INCIDENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_incident_id() -> IncidentId {
    let id = INCIDENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    IncidentId(format!("inc-{id:06}"))
}

impl<R> IncidentTriageService<R>
where
    R: IncidentRegister + 'static,
{
    pub fn new(register: Arc<R>) -> Self {
        Self {
            register,
            classifier: TriageClassifier,
        }
    }

    /// Classify without recording anything.
    pub fn triage(&self, text: &IncidentText) -> TriageResult {
        self.classifier.classify(text)
    }

    /// Classify the incident and store it, with its triage, as an open record.
    pub fn report(
        &self,
        text: IncidentText,
        reported_on: NaiveDate,
    ) -> Result<IncidentRecord, IncidentServiceError> {
        let triage = self.classifier.classify(&text);
        let record = IncidentRecord {
            id: next_incident_id(),
            text,
            triage,
            reported_on,
            status: IncidentStatus::Open,
            closed_on: None,
        };

        let stored = self.register.insert(record)?;
        info!(
            incident_id = %stored.id.0,
            category = ?stored.triage.category,
            tier = ?stored.triage.tier,
            "incident registered"
        );
        Ok(stored)
    }

    pub fn close(
        &self,
        id: &IncidentId,
        closed_on: NaiveDate,
    ) -> Result<IncidentRecord, IncidentServiceError> {
        let mut record = self.register.fetch(id)?.ok_or(RegisterError::NotFound)?;
        if record.status == IncidentStatus::Closed {
            return Err(IncidentServiceError::AlreadyClosed(id.0.clone()));
        }

        record.status = IncidentStatus::Closed;
        record.closed_on = Some(closed_on);
        self.register.update(record.clone())?;
        info!(incident_id = %id.0, "incident closed");
        Ok(record)
    }

    pub fn get(&self, id: &IncidentId) -> Result<IncidentRecord, IncidentServiceError> {
        let record = self.register.fetch(id)?.ok_or(RegisterError::NotFound)?;
        Ok(record)
    }

    /// Open incidents reported as critical; drives the dashboard's critical rule.
    pub fn open_critical_count(&self) -> Result<u32, IncidentServiceError> {
        let count = self
            .register
            .open_records()?
            .iter()
            .filter(|record| record.is_open_critical())
            .count();
        Ok(count as u32)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IncidentServiceError {
    #[error(transparent)]
    Register(#[from] RegisterError),
    #[error("incident {0} is already closed")]
    AlreadyClosed(String),
}
