use super::domain::{CheckCategory, RiskLevel};
use super::insights::DashboardInsights;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScoreEntry {
    pub category: CheckCategory,
    pub label: &'static str,
    pub score_percent: f64,
    pub checks: u32,
    pub violations: u32,
}

/// Rounded, label-enriched snapshot for dashboards and API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceSnapshotView {
    pub compliance_percent: u8,
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
    pub risk_reason: String,
    pub average_temperature: f64,
    pub temperature_violation_count: u32,
    pub hygiene_score_percent: u8,
    pub cleaning_score_percent: u8,
    pub categories: Vec<CategoryScoreEntry>,
    pub open_critical_incidents: u32,
    pub reports_filed_today: u32,
    pub last_computed_at: DateTime<Utc>,
    pub insights: DashboardInsights,
}
