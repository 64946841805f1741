use serde::{Deserialize, Serialize};

/// One logged temperature from a fridge, freezer, or hot-holding unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub value: f64,
    pub within_range: bool,
}

impl TemperatureReading {
    pub fn new(value: f64, within_range: bool) -> Self {
        Self {
            value,
            within_range,
        }
    }

    /// Flag the reading against an inclusive `min..=max` range.
    pub fn against_range(value: f64, min: f64, max: f64) -> Self {
        Self::new(value, value >= min && value <= max)
    }

    /// An explicit flag wins over the bounds. A single bound is checked on its
    /// own and a reading without any is taken as within range.
    pub fn resolve(
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
        within_range: Option<bool>,
    ) -> Self {
        match (within_range, min, max) {
            (Some(flag), _, _) => Self::new(value, flag),
            (None, Some(min), Some(max)) => Self::against_range(value, min, max),
            (None, Some(min), None) => Self::new(value, value >= min),
            (None, None, Some(max)) => Self::new(value, value <= max),
            (None, None, None) => Self::new(value, true),
        }
    }
}

/// Raw per-day tallies supplied by the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyCheckCounts {
    #[serde(default)]
    pub temperature_readings: Vec<TemperatureReading>,
    #[serde(default)]
    pub cleaning_tasks_total: u32,
    #[serde(default)]
    pub cleaning_tasks_completed: u32,
    #[serde(default)]
    pub hygiene_checks_total: u32,
    #[serde(default)]
    pub hygiene_checks_passed: u32,
    #[serde(default)]
    pub open_critical_incidents: u32,
    #[serde(default)]
    pub reports_filed_today: u32,
}

/// Total/completed pair returned for cleaning tasks and hygiene checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionTally {
    pub total: u32,
    pub completed: u32,
}

impl CompletionTally {
    pub fn new(total: u32, completed: u32) -> Self {
        Self { total, completed }
    }

    pub fn outstanding(&self) -> u32 {
        self.total.saturating_sub(self.completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Lav",
            Self::Medium => "Middels",
            Self::High => "Høy",
            Self::Critical => "Kritisk",
        }
    }
}

/// Daily check categories feeding the compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Temperature,
    Cleaning,
    Hygiene,
}

impl CheckCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Temperature, Self::Cleaning, Self::Hygiene]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperaturkontroll",
            Self::Cleaning => "Renhold",
            Self::Hygiene => "Hygienekontroll",
        }
    }
}
