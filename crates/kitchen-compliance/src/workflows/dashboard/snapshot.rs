use super::domain::{CheckCategory, DailyCheckCounts, RiskLevel};
use super::insights::DashboardInsights;
use super::policy::{assess_risk, RiskPolicy, RiskSignals};
use super::scoring::{measure, safe_ratio, VACUOUS_SCORE};
use super::views::{CategoryScoreEntry, ComplianceSnapshotView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of folding one day's checks into a compliance score and risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSnapshot {
    pub compliance_percent: f64,
    pub risk_level: RiskLevel,
    pub risk_reason: String,
    pub temperature_score_percent: f64,
    pub hygiene_score_percent: f64,
    pub cleaning_score_percent: f64,
    pub temperature_readings: u32,
    pub temperature_violation_count: u32,
    pub average_temperature: f64,
    pub cleaning_tasks_total: u32,
    pub cleaning_tasks_outstanding: u32,
    pub hygiene_checks_total: u32,
    pub hygiene_checks_failed: u32,
    pub total_checks: u32,
    pub violations: u32,
    pub open_critical_incidents: u32,
    pub reports_filed_today: u32,
    pub last_computed_at: DateTime<Utc>,
}

impl ComplianceSnapshot {
    /// Whole-number percentage for display. Thresholds use the unrounded value.
    pub fn compliance_percent_rounded(&self) -> u8 {
        self.compliance_percent.round().clamp(0.0, 100.0) as u8
    }

    /// Full-precision percentage re-derived from the stored totals.
    pub fn recomputed_compliance_percent(&self) -> f64 {
        safe_ratio(
            self.total_checks.saturating_sub(self.violations),
            self.total_checks,
            VACUOUS_SCORE,
        )
    }

    pub fn category_scores(&self) -> Vec<CategoryScoreEntry> {
        CheckCategory::ordered()
            .into_iter()
            .map(|category| {
                let (score_percent, checks, violations) = match category {
                    CheckCategory::Temperature => (
                        self.temperature_score_percent,
                        self.temperature_readings,
                        self.temperature_violation_count,
                    ),
                    CheckCategory::Cleaning => (
                        self.cleaning_score_percent,
                        self.cleaning_tasks_total,
                        self.cleaning_tasks_outstanding,
                    ),
                    CheckCategory::Hygiene => (
                        self.hygiene_score_percent,
                        self.hygiene_checks_total,
                        self.hygiene_checks_failed,
                    ),
                };

                CategoryScoreEntry {
                    category,
                    label: category.label(),
                    score_percent,
                    checks,
                    violations,
                }
            })
            .collect()
    }

    pub fn insights(&self) -> DashboardInsights {
        DashboardInsights::from_snapshot(self)
    }

    pub fn to_view(&self) -> ComplianceSnapshotView {
        ComplianceSnapshotView {
            compliance_percent: self.compliance_percent_rounded(),
            risk_level: self.risk_level,
            risk_label: self.risk_level.label(),
            risk_reason: self.risk_reason.clone(),
            average_temperature: (self.average_temperature * 10.0).round() / 10.0,
            temperature_violation_count: self.temperature_violation_count,
            hygiene_score_percent: self.hygiene_score_percent.round() as u8,
            cleaning_score_percent: self.cleaning_score_percent.round() as u8,
            categories: self.category_scores(),
            open_critical_incidents: self.open_critical_incidents,
            reports_filed_today: self.reports_filed_today,
            last_computed_at: self.last_computed_at,
            insights: self.insights(),
        }
    }
}

/// Stateless aggregator applying a risk policy to daily counts.
#[derive(Debug, Clone, Default)]
pub struct ComplianceAggregator {
    policy: RiskPolicy,
}

impl ComplianceAggregator {
    pub fn new(policy: RiskPolicy) -> Self {
        Self { policy }
    }

    pub fn compute_snapshot(
        &self,
        counts: &DailyCheckCounts,
        open_incidents_exist: bool,
    ) -> ComplianceSnapshot {
        self.compute_snapshot_at(counts, open_incidents_exist, Utc::now())
    }

    pub fn compute_snapshot_at(
        &self,
        counts: &DailyCheckCounts,
        open_incidents_exist: bool,
        computed_at: DateTime<Utc>,
    ) -> ComplianceSnapshot {
        let metrics = measure(counts);
        let assessment = assess_risk(
            &RiskSignals {
                open_incidents_exist,
                temperature_violation_count: metrics.temperature_violation_count,
                compliance_percent: metrics.compliance_percent,
            },
            &self.policy,
        );

        ComplianceSnapshot {
            compliance_percent: metrics.compliance_percent,
            risk_level: assessment.level,
            risk_reason: assessment.reason.to_string(),
            temperature_score_percent: metrics.temperature_score_percent,
            hygiene_score_percent: metrics.hygiene_score_percent,
            cleaning_score_percent: metrics.cleaning_score_percent,
            temperature_readings: metrics.temperature_readings,
            temperature_violation_count: metrics.temperature_violation_count,
            average_temperature: metrics.average_temperature,
            cleaning_tasks_total: counts.cleaning_tasks_total,
            cleaning_tasks_outstanding: metrics.cleaning_outstanding,
            hygiene_checks_total: counts.hygiene_checks_total,
            hygiene_checks_failed: metrics.hygiene_failures,
            total_checks: metrics.total_checks,
            violations: metrics.violations,
            open_critical_incidents: counts.open_critical_incidents,
            reports_filed_today: counts.reports_filed_today,
            last_computed_at: computed_at,
        }
    }
}

/// Score `counts` with the default risk policy.
pub fn compute_snapshot(
    counts: &DailyCheckCounts,
    open_incidents_exist: bool,
) -> ComplianceSnapshot {
    ComplianceAggregator::default().compute_snapshot(counts, open_incidents_exist)
}
