use super::domain::RiskLevel;
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_TEMPERATURE_VIOLATIONS: u32 = 5;
const DEFAULT_MINIMUM_COMPLIANCE_PERCENT: f64 = 85.0;

/// Thresholds applied when grading a day's snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// More violations than this escalates to `High`.
    pub max_temperature_violations: u32,
    /// Compliance strictly below this (unrounded) escalates to `Medium`.
    pub minimum_compliance_percent: f64,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            max_temperature_violations: DEFAULT_MAX_TEMPERATURE_VIOLATIONS,
            minimum_compliance_percent: DEFAULT_MINIMUM_COMPLIANCE_PERCENT,
        }
    }
}

/// Inputs the risk rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskSignals {
    pub open_incidents_exist: bool,
    pub temperature_violation_count: u32,
    pub compliance_percent: f64,
}

/// Outcome of the rule table: the level plus the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub reason: &'static str,
}

struct RiskRule {
    level: RiskLevel,
    reason: &'static str,
    applies: fn(&RiskSignals, &RiskPolicy) -> bool,
}

fn has_open_incident(signals: &RiskSignals, _policy: &RiskPolicy) -> bool {
    signals.open_incidents_exist
}

fn exceeds_temperature_limit(signals: &RiskSignals, policy: &RiskPolicy) -> bool {
    signals.temperature_violation_count > policy.max_temperature_violations
}

fn below_minimum_compliance(signals: &RiskSignals, policy: &RiskPolicy) -> bool {
    signals.compliance_percent < policy.minimum_compliance_percent
}

// Evaluated top to bottom; the first rule that applies decides the level.
const RISK_RULES: [RiskRule; 3] = [
    RiskRule {
        level: RiskLevel::Critical,
        reason: "open critical incident",
        applies: has_open_incident,
    },
    RiskRule {
        level: RiskLevel::High,
        reason: "temperature violations above limit",
        applies: exceeds_temperature_limit,
    },
    RiskRule {
        level: RiskLevel::Medium,
        reason: "compliance below minimum",
        applies: below_minimum_compliance,
    },
];

const BASELINE: RiskAssessment = RiskAssessment {
    level: RiskLevel::Low,
    reason: "all checks within policy",
};

pub fn assess_risk(signals: &RiskSignals, policy: &RiskPolicy) -> RiskAssessment {
    RISK_RULES
        .iter()
        .find(|rule| (rule.applies)(signals, policy))
        .map(|rule| RiskAssessment {
            level: rule.level,
            reason: rule.reason,
        })
        .unwrap_or(BASELINE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(open: bool, violations: u32, compliance: f64) -> RiskSignals {
        RiskSignals {
            open_incidents_exist: open,
            temperature_violation_count: violations,
            compliance_percent: compliance,
        }
    }

    #[test]
    fn open_incident_dominates_every_other_signal() {
        let policy = RiskPolicy::default();
        for (violations, compliance) in [(0, 100.0), (12, 100.0), (0, 10.0), (40, 0.0)] {
            let assessment = assess_risk(&signals(true, violations, compliance), &policy);
            assert_eq!(assessment.level, RiskLevel::Critical);
        }
    }

    #[test]
    fn temperature_limit_is_exclusive() {
        let policy = RiskPolicy::default();
        assert_eq!(
            assess_risk(&signals(false, 5, 100.0), &policy).level,
            RiskLevel::Low
        );
        assert_eq!(
            assess_risk(&signals(false, 6, 100.0), &policy).level,
            RiskLevel::High
        );
    }

    #[test]
    fn high_outranks_medium_when_both_apply() {
        let assessment = assess_risk(&signals(false, 8, 40.0), &RiskPolicy::default());
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.reason, "temperature violations above limit");
    }

    #[test]
    fn compliance_threshold_uses_unrounded_value() {
        let policy = RiskPolicy::default();
        // 84.6 would display as 85 but still sits below the minimum.
        assert_eq!(
            assess_risk(&signals(false, 0, 84.6), &policy).level,
            RiskLevel::Medium
        );
        assert_eq!(
            assess_risk(&signals(false, 0, 85.0), &policy).level,
            RiskLevel::Low
        );
    }
}
