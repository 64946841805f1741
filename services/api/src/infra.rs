use chrono::{NaiveDate, Utc};
use kitchen_compliance::workflows::dashboard::{
    ComplianceAggregator, ComplianceSnapshot, CompletionTally, DailyCheckSource,
    DailyChecksCollector, DegradedSource, SourceError, TemperatureReading,
};
use kitchen_compliance::workflows::incidents::{
    IncidentId, IncidentRecord, IncidentRegister, IncidentStatus, IncidentTriageService,
    RegisterError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryIncidentRegister {
    records: Arc<Mutex<HashMap<IncidentId, IncidentRecord>>>,
}

fn poisoned(what: &str) -> String {
    format!("{what} mutex poisoned")
}

impl IncidentRegister for InMemoryIncidentRegister {
    fn insert(&self, record: IncidentRecord) -> Result<IncidentRecord, RegisterError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RegisterError::Unavailable(poisoned("register")))?;
        if guard.contains_key(&record.id) {
            return Err(RegisterError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: IncidentRecord) -> Result<(), RegisterError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RegisterError::Unavailable(poisoned("register")))?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RegisterError::NotFound)
        }
    }

    fn fetch(&self, id: &IncidentId) -> Result<Option<IncidentRecord>, RegisterError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RegisterError::Unavailable(poisoned("register")))?;
        Ok(guard.get(id).cloned())
    }

    fn open_records(&self) -> Result<Vec<IncidentRecord>, RegisterError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RegisterError::Unavailable(poisoned("register")))?;
        Ok(guard
            .values()
            .filter(|record| record.status == IncidentStatus::Open)
            .cloned()
            .collect())
    }
}

/// A single check recorded through the API or the demo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum CheckEntry {
    Temperature {
        value: f64,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        within_range: Option<bool>,
    },
    Cleaning {
        completed: bool,
    },
    Hygiene {
        passed: bool,
    },
    Report,
}

#[derive(Debug, Clone, Default)]
struct DayLog {
    readings: Vec<TemperatureReading>,
    cleaning: CompletionTally,
    hygiene: CompletionTally,
    reports: u32,
}

/// Per-day check log; open critical incidents come from the shared register.
#[derive(Clone)]
pub(crate) struct InMemoryCheckLog {
    days: Arc<Mutex<HashMap<NaiveDate, DayLog>>>,
    incidents: Arc<InMemoryIncidentRegister>,
}

impl InMemoryCheckLog {
    pub(crate) fn new(incidents: Arc<InMemoryIncidentRegister>) -> Self {
        Self {
            days: Arc::new(Mutex::new(HashMap::new())),
            incidents,
        }
    }

    pub(crate) fn record(&self, day: NaiveDate, entry: CheckEntry) -> Result<(), SourceError> {
        let mut guard = self
            .days
            .lock()
            .map_err(|_| SourceError::Unavailable(poisoned("check log")))?;
        let log = guard.entry(day).or_default();

        match entry {
            CheckEntry::Temperature {
                value,
                min,
                max,
                within_range,
            } => log
                .readings
                .push(TemperatureReading::resolve(value, min, max, within_range)),
            CheckEntry::Cleaning { completed } => {
                log.cleaning.total += 1;
                if completed {
                    log.cleaning.completed += 1;
                }
            }
            CheckEntry::Hygiene { passed } => {
                log.hygiene.total += 1;
                if passed {
                    log.hygiene.completed += 1;
                }
            }
            CheckEntry::Report => log.reports += 1,
        }
        Ok(())
    }

    fn with_day<T>(
        &self,
        day: NaiveDate,
        read: impl FnOnce(&DayLog) -> T,
    ) -> Result<T, SourceError> {
        let guard = self
            .days
            .lock()
            .map_err(|_| SourceError::Unavailable(poisoned("check log")))?;
        Ok(match guard.get(&day) {
            Some(log) => read(log),
            None => read(&DayLog::default()),
        })
    }
}

impl DailyCheckSource for InMemoryCheckLog {
    fn temperature_readings(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, SourceError> {
        self.with_day(day, |log| log.readings.clone())
    }

    fn cleaning_tasks(&self, day: NaiveDate) -> Result<CompletionTally, SourceError> {
        self.with_day(day, |log| log.cleaning)
    }

    fn hygiene_checks(&self, day: NaiveDate) -> Result<CompletionTally, SourceError> {
        self.with_day(day, |log| log.hygiene)
    }

    fn reports_filed(&self, day: NaiveDate) -> Result<u32, SourceError> {
        self.with_day(day, |log| log.reports)
    }

    fn open_critical_incidents(&self) -> Result<u32, SourceError> {
        let open = self
            .incidents
            .open_records()
            .map_err(|err| SourceError::Unavailable(err.to_string()))?;
        Ok(open.iter().filter(|record| record.is_open_critical()).count() as u32)
    }
}

/// Latest computed snapshot together with the day it covers.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RefreshedSnapshot {
    pub(crate) day: NaiveDate,
    pub(crate) snapshot: ComplianceSnapshot,
    pub(crate) degraded: Vec<DegradedSource>,
}

/// Shared state behind the dashboard and incident endpoints.
#[derive(Clone)]
pub(crate) struct DashboardState {
    pub(crate) checks: Arc<InMemoryCheckLog>,
    pub(crate) incidents: Arc<IncidentTriageService<InMemoryIncidentRegister>>,
    pub(crate) aggregator: ComplianceAggregator,
    latest: Arc<RwLock<Option<RefreshedSnapshot>>>,
}

impl DashboardState {
    pub(crate) fn in_memory(aggregator: ComplianceAggregator) -> Self {
        let register = Arc::new(InMemoryIncidentRegister::default());
        Self {
            checks: Arc::new(InMemoryCheckLog::new(register.clone())),
            incidents: Arc::new(IncidentTriageService::new(register)),
            aggregator,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// Collect and score `day` without touching the cached snapshot.
    pub(crate) fn compute(&self, day: NaiveDate) -> RefreshedSnapshot {
        let collected = DailyChecksCollector.collect(self.checks.as_ref(), day);
        if !collected.degraded.is_empty() {
            warn!(%day, degraded = ?collected.degraded, "dashboard computed from partial data");
        }

        let snapshot = self.aggregator.compute_snapshot_at(
            &collected.counts,
            collected.open_incidents_exist,
            Utc::now(),
        );
        RefreshedSnapshot {
            day,
            snapshot,
            degraded: collected.degraded,
        }
    }

    /// Recompute `day` and replace the cached snapshot.
    pub(crate) async fn refresh(&self, day: NaiveDate) -> RefreshedSnapshot {
        let refreshed = self.compute(day);
        debug!(
            %day,
            compliance_percent = refreshed.snapshot.compliance_percent,
            risk_level = ?refreshed.snapshot.risk_level,
            "dashboard snapshot refreshed"
        );
        *self.latest.write().await = Some(refreshed.clone());
        refreshed
    }

    pub(crate) async fn cached(&self) -> Option<RefreshedSnapshot> {
        self.latest.read().await.clone()
    }

    /// Cached snapshot for `day`. It is recomputed when the cache covers another
    /// day or the register's open critical count has moved since it was taken.
    pub(crate) async fn latest_for(&self, day: NaiveDate) -> RefreshedSnapshot {
        if let Some(cached) = self.latest.read().await.as_ref() {
            let open_now = self.checks.open_critical_incidents().ok();
            if cached.day == day && open_now == Some(cached.snapshot.open_critical_incidents) {
                return cached.clone();
            }
        }
        self.refresh(day).await
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_compliance::workflows::dashboard::RiskLevel;
    use kitchen_compliance::workflows::incidents::{IncidentText, Severity};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).expect("valid date")
    }

    #[test]
    fn check_log_tallies_entries_per_day() {
        let log = InMemoryCheckLog::new(Arc::new(InMemoryIncidentRegister::default()));
        let entries = [
            CheckEntry::Temperature {
                value: 3.0,
                min: Some(0.0),
                max: Some(4.0),
                within_range: None,
            },
            CheckEntry::Temperature {
                value: 7.5,
                min: Some(0.0),
                max: Some(4.0),
                within_range: None,
            },
            CheckEntry::Cleaning { completed: true },
            CheckEntry::Cleaning { completed: false },
            CheckEntry::Hygiene { passed: true },
            CheckEntry::Report,
        ];
        for entry in entries {
            log.record(day(), entry).expect("recorded");
        }

        let readings = log.temperature_readings(day()).expect("readings");
        assert_eq!(readings.len(), 2);
        assert!(!readings[1].within_range);
        assert_eq!(log.cleaning_tasks(day()).expect("cleaning"), CompletionTally::new(2, 1));
        assert_eq!(log.hygiene_checks(day()).expect("hygiene"), CompletionTally::new(1, 1));
        assert_eq!(log.reports_filed(day()).expect("reports"), 1);

        let other_day = day().succ_opt().expect("next day");
        assert!(log.temperature_readings(other_day).expect("empty").is_empty());
    }

    #[test]
    fn check_entry_deserializes_from_tagged_json() {
        let entry: CheckEntry =
            serde_json::from_str(r#"{ "kind": "temperature", "value": -19.5, "max": -18 }"#)
                .expect("entry parses");
        assert_eq!(
            entry,
            CheckEntry::Temperature {
                value: -19.5,
                min: None,
                max: Some(-18.0),
                within_range: None,
            }
        );
    }

    #[tokio::test]
    async fn open_critical_incident_makes_dashboard_critical() {
        let state = DashboardState::in_memory(ComplianceAggregator::default());
        let before = state.refresh(day()).await;
        assert_eq!(before.snapshot.risk_level, RiskLevel::Low);

        state
            .incidents
            .report(
                IncidentText::new("Brann", "Brann i frityrgryta", Some(Severity::Critical)),
                day(),
            )
            .expect("incident registered");

        let during = state.latest_for(day()).await;
        assert_eq!(during.snapshot.risk_level, RiskLevel::Critical);
        assert_eq!(during.snapshot.open_critical_incidents, 1);
    }

    #[tokio::test]
    async fn closing_the_incident_lowers_cached_risk() {
        let state = DashboardState::in_memory(ComplianceAggregator::default());
        let record = state
            .incidents
            .report(
                IncidentText::new("Brann", "Brann i frityrgryta", Some(Severity::Critical)),
                day(),
            )
            .expect("incident registered");
        let during = state.refresh(day()).await;
        assert_eq!(during.snapshot.risk_level, RiskLevel::Critical);

        state.incidents.close(&record.id, day()).expect("incident closed");

        let after = state.latest_for(day()).await;
        assert_eq!(after.snapshot.risk_level, RiskLevel::Low);
        assert_eq!(after.snapshot.open_critical_incidents, 0);
        let cached = state.cached().await.expect("cache refreshed");
        assert_eq!(cached.snapshot.open_critical_incidents, 0);
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert_eq!(parse_date(" 2025-03-04 "), Ok(day()));
        assert!(parse_date("04.03.2025").is_err());
    }
}
