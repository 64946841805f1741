use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::incidents::domain::{IncidentText, Severity};
use crate::workflows::incidents::register::{
    IncidentId, IncidentRecord, IncidentRegister, IncidentStatus, RegisterError,
};
use crate::workflows::incidents::{incident_router, IncidentTriageService};

pub(super) fn reported_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 4).expect("valid date")
}

pub(super) fn freezer_leak() -> IncidentText {
    IncidentText::new(
        "Leak",
        "Fryseren lekker og temperaturen stiger",
        Some(Severity::High),
    )
}

pub(super) fn kitchen_fire() -> IncidentText {
    IncidentText::new(
        "Brann",
        "Brann i frityrgryta, slukket med brannteppe",
        Some(Severity::Critical),
    )
}

pub(super) fn build_service() -> (IncidentTriageService<MemoryRegister>, Arc<MemoryRegister>) {
    let register = Arc::new(MemoryRegister::default());
    let service = IncidentTriageService::new(register.clone());
    (service, register)
}

pub(super) fn router_with_service(
    service: IncidentTriageService<MemoryRegister>,
) -> axum::Router {
    incident_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRegister {
    pub(super) records: Arc<Mutex<HashMap<IncidentId, IncidentRecord>>>,
}

impl IncidentRegister for MemoryRegister {
    fn insert(&self, record: IncidentRecord) -> Result<IncidentRecord, RegisterError> {
        let mut guard = self.records.lock().expect("register mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RegisterError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: IncidentRecord) -> Result<(), RegisterError> {
        let mut guard = self.records.lock().expect("register mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &IncidentId) -> Result<Option<IncidentRecord>, RegisterError> {
        let guard = self.records.lock().expect("register mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn open_records(&self) -> Result<Vec<IncidentRecord>, RegisterError> {
        let guard = self.records.lock().expect("register mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == IncidentStatus::Open)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRegister;

impl IncidentRegister for UnavailableRegister {
    fn insert(&self, _record: IncidentRecord) -> Result<IncidentRecord, RegisterError> {
        Err(RegisterError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: IncidentRecord) -> Result<(), RegisterError> {
        Err(RegisterError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &IncidentId) -> Result<Option<IncidentRecord>, RegisterError> {
        Err(RegisterError::Unavailable("database offline".to_string()))
    }

    fn open_records(&self) -> Result<Vec<IncidentRecord>, RegisterError> {
        Err(RegisterError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
