use super::domain::{CheckCategory, CompletionTally, DailyCheckCounts, TemperatureReading};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

/// Read-only view of the record store the dashboard pulls its daily counts from.
pub trait DailyCheckSource: Send + Sync {
    fn temperature_readings(&self, day: NaiveDate) -> Result<Vec<TemperatureReading>, SourceError>;
    fn cleaning_tasks(&self, day: NaiveDate) -> Result<CompletionTally, SourceError>;
    fn hygiene_checks(&self, day: NaiveDate) -> Result<CompletionTally, SourceError>;
    fn reports_filed(&self, day: NaiveDate) -> Result<u32, SourceError>;
    fn open_critical_incidents(&self) -> Result<u32, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no records for {0}")]
    NoData(NaiveDate),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Which fetch fell back to its empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedSource {
    Check(CheckCategory),
    Reports,
    Incidents,
}

/// Counts gathered for one day, with the fetches that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedChecks {
    pub counts: DailyCheckCounts,
    pub open_incidents_exist: bool,
    pub degraded: Vec<DegradedSource>,
}

/// Assembles `DailyCheckCounts` from a source. A failed fetch contributes an
/// empty denominator and is logged; collection itself never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DailyChecksCollector;

impl DailyChecksCollector {
    pub fn collect<S>(&self, source: &S, day: NaiveDate) -> CollectedChecks
    where
        S: DailyCheckSource + ?Sized,
    {
        let mut degraded = Vec::new();

        let temperature_readings = or_empty(
            source.temperature_readings(day),
            DegradedSource::Check(CheckCategory::Temperature),
            &mut degraded,
        );
        let cleaning = or_empty(
            source.cleaning_tasks(day),
            DegradedSource::Check(CheckCategory::Cleaning),
            &mut degraded,
        );
        let hygiene = or_empty(
            source.hygiene_checks(day),
            DegradedSource::Check(CheckCategory::Hygiene),
            &mut degraded,
        );
        let reports_filed_today =
            or_empty(source.reports_filed(day), DegradedSource::Reports, &mut degraded);
        let open_critical_incidents = or_empty(
            source.open_critical_incidents(),
            DegradedSource::Incidents,
            &mut degraded,
        );

        CollectedChecks {
            counts: DailyCheckCounts {
                temperature_readings,
                cleaning_tasks_total: cleaning.total,
                cleaning_tasks_completed: cleaning.completed,
                hygiene_checks_total: hygiene.total,
                hygiene_checks_passed: hygiene.completed,
                open_critical_incidents,
                reports_filed_today,
            },
            open_incidents_exist: open_critical_incidents > 0,
            degraded,
        }
    }
}

fn or_empty<T: Default>(
    result: Result<T, SourceError>,
    which: DegradedSource,
    degraded: &mut Vec<DegradedSource>,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(source = ?which, error = %err, "daily check fetch failed; treating as empty");
            degraded.push(which);
            T::default()
        }
    }
}
