use serde::{Deserialize, Deserializer, Serialize};

/// Severity chosen by the person reporting the incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parse an English, Norwegian, or Arabic severity label.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" | "lav" | "منخفض" => Some(Self::Low),
            "medium" | "middels" | "moderat" | "متوسط" => Some(Self::Medium),
            "high" | "høy" | "hoy" | "عالي" | "عالية" => Some(Self::High),
            "critical" | "kritisk" | "حرج" | "حرجة" => Some(Self::Critical),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Lav",
            Self::Medium => "Middels",
            Self::High => "Høy",
            Self::Critical => "Kritisk",
        }
    }
}

/// The three response playbooks. Anything below `High`, or no severity at all,
/// gets the standard playbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Critical,
    High,
    Standard,
}

impl From<Option<Severity>> for SeverityTier {
    fn from(severity: Option<Severity>) -> Self {
        match severity {
            Some(Severity::Critical) => Self::Critical,
            Some(Severity::High) => Self::High,
            Some(Severity::Medium) | Some(Severity::Low) | None => Self::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentCategory {
    Temperature,
    Food,
    Hygiene,
    Equipment,
    Safety,
    General,
}

impl IncidentCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperatur",
            Self::Food => "Mat og råvarer",
            Self::Hygiene => "Hygiene",
            Self::Equipment => "Utstyr",
            Self::Safety => "Sikkerhet",
            Self::General => "Generelt",
        }
    }
}

/// Free-text incident as entered in the deviation register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentText {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        alias = "severity",
        deserialize_with = "deserialize_lenient_severity"
    )]
    pub preselected_severity: Option<Severity>,
}

impl IncidentText {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Option<Severity>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            preselected_severity: severity,
        }
    }

    /// Build from an unvalidated severity string; unknown labels become `None`.
    pub fn from_raw(
        title: impl Into<String>,
        description: impl Into<String>,
        raw_severity: &str,
    ) -> Self {
        Self::new(title, description, Severity::parse(raw_severity))
    }

    pub fn tier(&self) -> SeverityTier {
        SeverityTier::from(self.preselected_severity)
    }
}

/// Classification output stored next to the incident record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub category: IncidentCategory,
    pub tier: SeverityTier,
    pub analysis: String,
    pub consequences: Vec<String>,
    pub remediation_steps: Vec<String>,
}

fn deserialize_lenient_severity<'de, D>(deserializer: D) -> Result<Option<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Severity::parse))
}
